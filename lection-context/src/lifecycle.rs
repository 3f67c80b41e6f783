//! Bean lifecycles.
//!
//! - [`Lifecycle::Singleton`]: created once per context, shared afterwards
//! - [`Lifecycle::Prototype`]: created anew on every lookup
//!
//! A singleton outlives a prototype, so `Singleton > Prototype`.

use std::fmt;

/// How long a bean produced by the context lives.
///
/// ```
/// use lection_context::lifecycle::Lifecycle;
///
/// assert!(Lifecycle::Singleton > Lifecycle::Prototype);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// One instance per context, built on first lookup (or at startup
    /// when the context is eager) and cloned out afterwards.
    Singleton,

    /// A fresh instance for every lookup. Never cached.
    Prototype,
}

impl Lifecycle {
    #[inline]
    pub fn is_singleton(&self) -> bool {
        matches!(self, Lifecycle::Singleton)
    }

    #[inline]
    fn rank(&self) -> u8 {
        match self {
            Lifecycle::Singleton => 1,
            Lifecycle::Prototype => 0,
        }
    }
}

impl PartialOrd for Lifecycle {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Lifecycle {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Lifecycle::Singleton => "Singleton",
            Lifecycle::Prototype => "Prototype",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_outlives_prototype() {
        assert!(Lifecycle::Singleton > Lifecycle::Prototype);
        assert!(Lifecycle::Singleton.is_singleton());
        assert!(!Lifecycle::Prototype.is_singleton());
    }

    #[test]
    fn display() {
        assert_eq!(Lifecycle::Singleton.to_string(), "Singleton");
        assert_eq!(Lifecycle::Prototype.to_string(), "Prototype");
    }
}
