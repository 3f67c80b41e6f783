//! Application settings.
//!
//! Defaults apply unless `LECTION_CONFIG` names a JSON file. Any field
//! may be left out of the file:
//!
//! ```json
//! {
//!   "pretty_printer": "capitalize",
//!   "log_filter": "lection=debug",
//!   "authors": [{ "id": 1, "name": "plato" }]
//! }
//! ```

use std::fs;
use std::path::Path;

use lection_domain::{Author, PrinterKind};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Environment variable holding the settings file path.
pub const CONFIG_ENV: &str = "LECTION_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Printer applied to author names; `none` disables it.
    pub pretty_printer: PrinterKind,
    /// Let later bean definitions replace earlier ones.
    pub allow_override: bool,
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Seed data for the in-memory author repository.
    pub authors: Vec<Author>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pretty_printer: PrinterKind::default(),
            allow_override: false,
            log_filter: "lection=info".to_string(),
            authors: Vec::new(),
        }
    }
}

impl Settings {
    /// Reads the file named by [`CONFIG_ENV`], or returns defaults.
    pub fn load() -> AppResult<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| AppError::ReadSettings {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| AppError::ParseSettings {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("lection-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.pretty_printer, PrinterKind::Capitalize);
        assert!(!settings.allow_override);
        assert_eq!(settings.log_filter, "lection=info");
        assert!(settings.authors.is_empty());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let path = temp_file(
            "partial.json",
            r#"{"pretty_printer": "none", "authors": [{"id": 1, "name": "plato"}]}"#,
        );

        let settings = Settings::from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.pretty_printer, PrinterKind::None);
        assert_eq!(settings.log_filter, "lection=info");
        assert_eq!(settings.authors, vec![Author::new().with_id(1).with_name("plato")]);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = Settings::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, AppError::ReadSettings { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let path = temp_file("broken.json", r#"{"pretty_printer": "sparkly"}"#);

        let err = Settings::from_file(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(matches!(err, AppError::ParseSettings { .. }));
    }
}
