//! The composition root.
//!
//! Two configurations describe the whole object graph:
//!
//! ```text
//! RepositoryConfiguration   Arc<dyn Repository<Author, i64>>   (required)
//! ServiceConfiguration      Arc<dyn PrettyPrinter>             (optional)
//!                           Arc<dyn AuthorService>             requires the repository
//! ```
//!
//! [`bootstrap`] builds them into an eager context, so wiring mistakes
//! surface at startup.

use std::sync::Arc;

use lection_context::prelude::*;
use lection_domain::{
    Author, AuthorRepository, AuthorService, AuthorServiceImpl, CapitalizePrettyPrinter,
    InMemoryRepository, PrettyPrinter, PrinterKind,
};
use tracing::{debug, info, instrument, warn};

use crate::error::AppResult;
use crate::settings::Settings;

/// Defines the author repository, seeded with the given authors.
pub struct RepositoryConfiguration {
    seed: Vec<(i64, Author)>,
}

impl RepositoryConfiguration {
    /// Authors without an id cannot be stored and are skipped.
    pub fn from_authors(authors: &[Author]) -> Self {
        let seed = authors
            .iter()
            .filter_map(|author| match author.id() {
                Some(id) => Some((id, author.clone())),
                None => {
                    warn!(name = ?author.name(), "Skipping seed author without an id");
                    None
                }
            })
            .collect();
        Self { seed }
    }
}

impl Configuration for RepositoryConfiguration {
    fn register(&self, registrar: &mut dyn BeanRegistrar) {
        let seed = self.seed.clone();
        registrar.define(BeanDefinition::singleton::<AuthorRepository>(move |_| {
            debug!(authors = seed.len(), "Creating in-memory author repository");
            Ok(Arc::new(InMemoryRepository::with_entries(seed.clone())) as AuthorRepository)
        }));
    }
}

/// Defines the pretty printer (when one is configured) and the author
/// service on top of whatever repository the context holds.
pub struct ServiceConfiguration {
    printer: PrinterKind,
}

impl ServiceConfiguration {
    pub fn new(printer: PrinterKind) -> Self {
        Self { printer }
    }
}

impl Configuration for ServiceConfiguration {
    fn register(&self, registrar: &mut dyn BeanRegistrar) {
        match self.printer {
            PrinterKind::Capitalize => {
                registrar.define(BeanDefinition::singleton::<Arc<dyn PrettyPrinter>>(|_| {
                    Ok(Arc::new(CapitalizePrettyPrinter) as Arc<dyn PrettyPrinter>)
                }))
            }
            PrinterKind::None => debug!("No pretty printer configured"),
        }

        registrar.define(
            BeanDefinition::singleton::<Arc<dyn AuthorService>>(|beans| {
                let repository: AuthorRepository = get_bean(beans)?;
                let printer: Option<Arc<dyn PrettyPrinter>> = get_optional_bean(beans)?;

                let service = AuthorServiceImpl::builder()
                    .repository(repository)
                    .maybe_pretty_printer(printer)
                    .build()
                    .map_err(ContextError::creation::<Arc<dyn AuthorService>>)?;

                debug!(?service, "Created author service");
                Ok(Arc::new(service) as Arc<dyn AuthorService>)
            })
            .requiring::<AuthorRepository>(),
        );
    }
}

/// Builds the application context described by `settings`.
#[instrument(skip_all, fields(printer = ?settings.pretty_printer))]
pub fn bootstrap(settings: &Settings) -> AppResult<ApplicationContext> {
    let context = ApplicationContext::builder()
        .allow_override(settings.allow_override)
        .eager(true)
        .add_configuration(&RepositoryConfiguration::from_authors(&settings.authors))
        .add_configuration(&ServiceConfiguration::new(settings.pretty_printer))
        .build()?;

    info!(beans = context.bean_count(), "Object graph assembled");
    Ok(context)
}

/// Fetches one author through the context's author service.
pub fn find_author(context: &ApplicationContext, author_id: i64) -> AppResult<Author> {
    let service: Arc<dyn AuthorService> = context.get_bean()?;
    Ok(service.get_author(author_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use lection_domain::DomainError;

    fn settings(printer: PrinterKind) -> Settings {
        Settings {
            pretty_printer: printer,
            authors: vec![
                Author::new().with_id(1).with_name("plato"),
                Author::new().with_id(2).with_name("Aristotle"),
                Author::new().with_name("nobody"),
            ],
            ..Settings::default()
        }
    }

    #[test]
    fn capitalizes_through_the_context() {
        let context = bootstrap(&settings(PrinterKind::Capitalize)).unwrap();

        let author = find_author(&context, 1).unwrap();
        assert_eq!(author, Author::new().with_id(1).with_name("Plato"));
        assert!(context.contains_bean::<Arc<dyn PrettyPrinter>>());
    }

    #[test]
    fn no_printer_leaves_names_alone() {
        let context = bootstrap(&settings(PrinterKind::None)).unwrap();

        assert_eq!(
            find_author(&context, 2).unwrap(),
            Author::new().with_id(2).with_name("Aristotle")
        );
        assert_eq!(find_author(&context, 1).unwrap().name(), Some("plato"));
        assert!(!context.contains_bean::<Arc<dyn PrettyPrinter>>());
    }

    #[test]
    fn unknown_author_is_not_found() {
        let context = bootstrap(&settings(PrinterKind::Capitalize)).unwrap();

        let err = find_author(&context, 99).unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::NotFound { .. })));
        assert_eq!(err.to_string(), "Author with id 99 not found");
    }

    #[test]
    fn authors_without_id_are_not_seeded() {
        let config = RepositoryConfiguration::from_authors(&settings(PrinterKind::None).authors);
        assert_eq!(config.seed.len(), 2);
    }

    #[test]
    fn service_without_repository_fails_at_startup() {
        let err = ApplicationContext::builder()
            .eager(true)
            .add_configuration(&ServiceConfiguration::new(PrinterKind::Capitalize))
            .build()
            .unwrap_err();

        match err {
            ContextError::NoSuchBean(e) => {
                assert_eq!(e.requested, BeanKey::of::<AuthorRepository>());
                assert_eq!(e.required_by, Some(BeanKey::of::<Arc<dyn AuthorService>>()));
            }
            other => panic!("expected NoSuchBean, got {other:?}"),
        }
    }

    #[test]
    fn service_is_a_singleton() {
        let context = bootstrap(&settings(PrinterKind::Capitalize)).unwrap();

        let a: Arc<dyn AuthorService> = context.get_bean().unwrap();
        let b: Arc<dyn AuthorService> = context.get_bean().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn repository_can_be_overridden() {
        let replacement: AuthorRepository = Arc::new(InMemoryRepository::with_entries([(
            1i64,
            Author::new().with_id(1).with_name("socrates"),
        )]));

        let context = ApplicationContext::builder()
            .allow_override(true)
            .add_configuration(&RepositoryConfiguration::from_authors(&[]))
            .singleton_value(replacement)
            .add_configuration(&ServiceConfiguration::new(PrinterKind::Capitalize))
            .build()
            .unwrap();

        assert_eq!(find_author(&context, 1).unwrap().name(), Some("Socrates"));
    }

    #[test]
    fn bean_report_lists_the_graph() {
        let context = bootstrap(&settings(PrinterKind::Capitalize)).unwrap();
        let report = context.describe();

        assert!(report.contains("Arc<dyn AuthorService>  requires: Arc<dyn Repository<Author, i64>>"));
        assert!(report.contains("Arc<dyn PrettyPrinter>"));
        assert_eq!(context.bean_count(), 3);
    }
}
