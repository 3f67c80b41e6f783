//! Author lookup service.
//!
//! [`AuthorServiceImpl`] composes a [`Repository`] with an optional
//! [`PrettyPrinter`]. Both are fixed at construction.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::author::Author;
use crate::error::{DomainError, DomainResult};
use crate::printer::PrettyPrinter;
use crate::repository::Repository;

/// Repository of authors keyed by their numeric id.
pub type AuthorRepository = Arc<dyn Repository<Author, i64>>;

pub trait AuthorService: Send + Sync {
    /// Looks up an author and prettifies its name when a printer is wired.
    ///
    /// # Errors
    /// Whatever the repository returns, unchanged; usually
    /// [`DomainError::NotFound`].
    fn get_author(&self, author_id: i64) -> DomainResult<Author>;
}

pub struct AuthorServiceImpl {
    repository: AuthorRepository,
    pretty_printer: Option<Arc<dyn PrettyPrinter>>,
}

impl AuthorServiceImpl {
    pub fn new(repository: AuthorRepository, pretty_printer: Option<Arc<dyn PrettyPrinter>>) -> Self {
        Self {
            repository,
            pretty_printer,
        }
    }

    pub fn builder() -> AuthorServiceBuilder {
        AuthorServiceBuilder::default()
    }

    pub fn has_pretty_printer(&self) -> bool {
        self.pretty_printer.is_some()
    }
}

impl AuthorService for AuthorServiceImpl {
    #[instrument(skip(self), level = "debug")]
    fn get_author(&self, author_id: i64) -> DomainResult<Author> {
        let mut author = self.repository.find_one(&author_id)?;

        if let Some(printer) = &self.pretty_printer {
            // absent names stay absent
            if let Some(name) = author.name() {
                let pretty = printer.prettify(name);
                debug!(from = name, to = %pretty, "Prettified author name");
                author.set_name(Some(pretty));
            }
        }

        Ok(author)
    }
}

impl fmt::Debug for AuthorServiceImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorServiceImpl")
            .field("pretty_printer", &self.has_pretty_printer())
            .finish_non_exhaustive()
    }
}

/// Assembles an [`AuthorServiceImpl`]; the repository is mandatory.
///
/// ```
/// use lection_domain::service::AuthorServiceImpl;
///
/// let err = AuthorServiceImpl::builder().build().unwrap_err();
/// assert!(err.to_string().contains("repository"));
/// ```
#[derive(Default)]
pub struct AuthorServiceBuilder {
    repository: Option<AuthorRepository>,
    pretty_printer: Option<Arc<dyn PrettyPrinter>>,
}

impl AuthorServiceBuilder {
    pub fn repository(mut self, repository: AuthorRepository) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn pretty_printer(mut self, printer: Arc<dyn PrettyPrinter>) -> Self {
        self.pretty_printer = Some(printer);
        self
    }

    /// Like [`pretty_printer`](Self::pretty_printer), for a printer that
    /// may not be configured.
    pub fn maybe_pretty_printer(mut self, printer: Option<Arc<dyn PrettyPrinter>>) -> Self {
        self.pretty_printer = printer;
        self
    }

    /// # Errors
    /// [`DomainError::Construction`] when no repository was supplied.
    pub fn build(self) -> DomainResult<AuthorServiceImpl> {
        let repository = self.repository.ok_or(DomainError::Construction {
            component: "AuthorServiceImpl",
            missing: "repository",
        })?;
        Ok(AuthorServiceImpl::new(repository, self.pretty_printer))
    }
}
