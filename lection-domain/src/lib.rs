//! Authors, where to find them, and how to show their names.

pub mod author;
pub mod error;
pub mod printer;
pub mod repository;
pub mod service;

pub use author::Author;
pub use error::{DomainError, DomainResult};
pub use printer::{CapitalizePrettyPrinter, PrettyPrinter, PrinterKind};
pub use repository::{InMemoryRepository, Repository};
pub use service::{AuthorRepository, AuthorService, AuthorServiceImpl};
