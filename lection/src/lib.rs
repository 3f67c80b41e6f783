//! # Lection
//!
//! Hand-wired dependency injection: an application context assembles an
//! author repository, an optional pretty printer and the author service
//! that combines them.
//!
//! ```rust
//! use lection::{Settings, bootstrap, find_author};
//! use lection::domain::Author;
//!
//! let settings = Settings {
//!     authors: vec![Author::new().with_id(1).with_name("plato")],
//!     ..Settings::default()
//! };
//! let context = bootstrap(&settings).expect("context");
//! assert_eq!(find_author(&context, 1).expect("author").name(), Some("Plato"));
//! ```

pub mod beans;
pub mod error;
pub mod settings;
pub mod telemetry;

pub use beans::{RepositoryConfiguration, ServiceConfiguration, bootstrap, find_author};
pub use error::{AppError, AppResult};
pub use settings::Settings;

pub use lection_context as context;
pub use lection_domain as domain;
pub use lection_support as support;
