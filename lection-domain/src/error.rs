//! Domain errors.

/// What can go wrong when wiring or calling domain services.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// A required collaborator was not supplied at construction.
    #[error("Cannot construct {component}: {missing} must be provided")]
    Construction {
        component: &'static str,
        missing: &'static str,
    },

    /// The repository holds no entity under the requested id.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: String, id: String },
}

pub type DomainResult<T> = Result<T, DomainError>;
