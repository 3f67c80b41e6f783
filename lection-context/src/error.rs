//! Errors raised while building or querying an application context.
//!
//! Every message names the beans involved by their short type names
//! and ends with a hint on how to fix the wiring.

use std::fmt;

use lection_support::rendering::render_chain;

use crate::key::BeanKey;
use crate::lifecycle::Lifecycle;

/// Boxed error produced by a bean factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// No bean of the requested type is registered.
    #[error("{}", .0)]
    NoSuchBean(NoSuchBeanError),

    /// Beans require each other in a loop.
    #[error("{}", .0)]
    CircularReference(CircularReferenceError),

    /// A singleton requires a prototype.
    #[error("{}", .0)]
    LifecycleMismatch(LifecycleMismatchError),

    /// Same type registered twice without `allow_override`.
    #[error("Bean already registered: {key}\n  Hint: call .allow_override(true) on the builder to replace it")]
    DuplicateBean { key: BeanKey },

    /// A factory failed, or produced a value of the wrong type.
    #[error("Error creating bean {key}: {source}")]
    BeanCreation {
        key: BeanKey,
        #[source]
        source: BoxError,
    },
}

impl ContextError {
    /// Wraps a factory failure for bean `T`.
    ///
    /// ```
    /// use lection_context::error::ContextError;
    ///
    /// let err = ContextError::creation::<String>("disk on fire");
    /// assert!(err.to_string().contains("String"));
    /// ```
    pub fn creation<T: ?Sized + 'static>(source: impl Into<BoxError>) -> Self {
        ContextError::BeanCreation {
            key: BeanKey::of::<T>(),
            source: source.into(),
        }
    }
}

/// A lookup or declared requirement named a bean nobody registered.
#[derive(Debug)]
pub struct NoSuchBeanError {
    pub requested: BeanKey,
    /// The bean whose definition declared the requirement, if any.
    pub required_by: Option<BeanKey>,
    /// Registered beans with similar names.
    pub suggestions: Vec<String>,
}

impl fmt::Display for NoSuchBeanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No bean of type {} is registered", self.requested)?;

        if let Some(parent) = &self.required_by {
            write!(f, "\n  Required by: {parent}")?;
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for s in &self.suggestions {
                write!(f, "\n    - {s}")?;
            }
        }

        write!(
            f,
            "\n  Hint: register it with .singleton::<{}>(..) or through a Configuration",
            self.requested
        )
    }
}

/// Chain of beans forming a loop, first bean repeated at the end.
#[derive(Debug)]
pub struct CircularReferenceError {
    pub chain: Vec<BeanKey>,
}

impl fmt::Display for CircularReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.chain.iter().map(BeanKey::short_name).collect();
        write!(f, "Circular reference between beans:\n  {}", render_chain(&names))?;
        write!(
            f,
            "\n  Hint: make one side optional and look it up with get_optional_bean"
        )
    }
}

/// A longer-lived bean declared a shorter-lived requirement.
#[derive(Debug)]
pub struct LifecycleMismatchError {
    pub consumer: BeanKey,
    pub consumer_lifecycle: Lifecycle,
    pub dependency: BeanKey,
    pub dependency_lifecycle: Lifecycle,
}

impl fmt::Display for LifecycleMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lifecycle mismatch: {} ({}) requires {} ({})",
            self.consumer, self.consumer_lifecycle, self.dependency, self.dependency_lifecycle,
        )?;
        write!(
            f,
            "\n  A {} would capture a single {} forever",
            self.consumer_lifecycle, self.dependency_lifecycle,
        )?;
        write!(
            f,
            "\n  Hint: register {} as a {}",
            self.dependency, self.consumer_lifecycle
        )
    }
}

pub type Result<T> = std::result::Result<T, ContextError>;

#[cfg(test)]
mod tests {
    use super::*;

    struct AuthorService;
    struct Repository;

    #[test]
    fn no_such_bean_mentions_requirer_and_hint() {
        let err = ContextError::NoSuchBean(NoSuchBeanError {
            requested: BeanKey::of::<Repository>(),
            required_by: Some(BeanKey::of::<AuthorService>()),
            suggestions: vec!["RepositoryImpl".into()],
        });

        let msg = err.to_string();
        assert!(msg.starts_with("No bean of type Repository"));
        assert!(msg.contains("Required by: AuthorService"));
        assert!(msg.contains("- RepositoryImpl"));
        assert!(msg.contains("Hint"));
    }

    #[test]
    fn circular_reference_renders_chain() {
        let err = ContextError::CircularReference(CircularReferenceError {
            chain: vec![
                BeanKey::of::<AuthorService>(),
                BeanKey::of::<Repository>(),
                BeanKey::of::<AuthorService>(),
            ],
        });

        assert!(err
            .to_string()
            .contains("AuthorService → Repository → AuthorService"));
    }

    #[test]
    fn lifecycle_mismatch_names_both_sides() {
        let err = ContextError::LifecycleMismatch(LifecycleMismatchError {
            consumer: BeanKey::of::<AuthorService>(),
            consumer_lifecycle: Lifecycle::Singleton,
            dependency: BeanKey::of::<Repository>(),
            dependency_lifecycle: Lifecycle::Prototype,
        });

        let msg = err.to_string();
        assert!(msg.contains("AuthorService (Singleton) requires Repository (Prototype)"));
    }

    #[test]
    fn creation_keeps_source() {
        use std::error::Error as _;

        let err = ContextError::creation::<AuthorService>("repository missing");
        assert!(err.source().is_some());
        assert!(err.to_string().contains("AuthorService: repository missing"));
    }
}
