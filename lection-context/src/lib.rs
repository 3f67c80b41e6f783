//! A small application context: bean definitions, build-time validation
//! and typed lookups.

pub mod configuration;
pub mod context;
pub mod error;
mod creation;
mod graph;
pub mod key;
pub mod lifecycle;
pub mod registry;

pub use context::prelude;
pub use error::{ContextError, Result};
pub use key::BeanKey;
pub use lifecycle::Lifecycle;
