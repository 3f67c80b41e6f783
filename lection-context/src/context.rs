//! # The application context
//!
//! Holds bean definitions and produces beans on request.
//!
//! ```text
//! ContextBuilder ──build()──> ApplicationContext ──get_bean::<T>()──> T
//!   (define, add_configuration)   (validated, optionally eager)
//! ```
//!
//! # Examples
//! ```rust
//! use lection_context::prelude::*;
//! use std::sync::Arc;
//!
//! trait Shelf: Send + Sync {
//!     fn title(&self, id: u64) -> String;
//! }
//!
//! struct MemoryShelf;
//! impl Shelf for MemoryShelf {
//!     fn title(&self, id: u64) -> String { format!("book #{id}") }
//! }
//!
//! struct Librarian {
//!     shelf: Arc<dyn Shelf>,
//! }
//!
//! let context = ApplicationContext::builder()
//!     .singleton::<Arc<dyn Shelf>>(|_| Ok(Arc::new(MemoryShelf) as Arc<dyn Shelf>))
//!     .define(
//!         BeanDefinition::singleton::<Arc<Librarian>>(|beans| {
//!             let shelf: Arc<dyn Shelf> = get_bean(beans)?;
//!             Ok(Arc::new(Librarian { shelf }))
//!         })
//!         .requiring::<Arc<dyn Shelf>>(),
//!     )
//!     .build()
//!     .expect("context");
//!
//! let librarian: Arc<Librarian> = context.get_bean().expect("librarian");
//! assert_eq!(librarian.shelf.title(3), "book #3");
//! ```

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use lection_support::rendering::{BeanLine, render_bean_report, suggest_similar};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, trace, warn};

use crate::configuration::{BeanRegistrar, Configuration};
use crate::creation::CreationTracker;
use crate::error::{CircularReferenceError, ContextError, NoSuchBeanError, Result};
use crate::graph::DefinitionValidator;
use crate::key::BeanKey;
use crate::registry::{BeanDefinition, BeanFactory, BeanInstance, DefinitionTable};

// ============================================================
// ContextBuilder
// ============================================================

/// Collects bean definitions and turns them into an [`ApplicationContext`].
///
/// Registration never fails on the spot; the first problem (a duplicate
/// bean, say) is kept and returned by [`build`](ContextBuilder::build).
pub struct ContextBuilder {
    table: DefinitionTable,
    allow_override: bool,
    eager: bool,
    first_error: Option<ContextError>,
}

impl ContextBuilder {
    fn new() -> Self {
        Self {
            table: DefinitionTable::new(),
            allow_override: false,
            eager: false,
            first_error: None,
        }
    }

    /// Let later definitions replace earlier ones of the same type.
    /// Affects definitions added after this call.
    pub fn allow_override(mut self, allow: bool) -> Self {
        self.allow_override = allow;
        self
    }

    /// Build every singleton inside [`build`](ContextBuilder::build), so
    /// a failing factory aborts startup instead of the first lookup.
    pub fn eager(mut self, eager: bool) -> Self {
        self.eager = eager;
        self
    }

    /// A singleton that already exists. Cloned on every lookup.
    pub fn singleton_value<T: Clone + Send + Sync + 'static>(mut self, value: T) -> Self {
        BeanRegistrar::define(&mut self, BeanDefinition::singleton_value(value));
        self
    }

    /// A singleton built once by `factory`. `T` must be `Clone`; wrap
    /// services in `Arc`.
    pub fn singleton<T: Clone + Send + Sync + 'static>(
        mut self,
        factory: impl Fn(&dyn BeanFactory) -> Result<T> + Send + Sync + 'static,
    ) -> Self {
        BeanRegistrar::define(&mut self, BeanDefinition::singleton(factory));
        self
    }

    /// A bean built by `factory` on every lookup.
    pub fn prototype<T: Send + Sync + 'static>(
        mut self,
        factory: impl Fn(&dyn BeanFactory) -> Result<T> + Send + Sync + 'static,
    ) -> Self {
        BeanRegistrar::define(&mut self, BeanDefinition::prototype(factory));
        self
    }

    /// Adds a prepared definition, e.g. one with declared requirements.
    pub fn define(mut self, definition: BeanDefinition) -> Self {
        BeanRegistrar::define(&mut self, definition);
        self
    }

    /// Adds every bean a [`Configuration`] defines.
    pub fn add_configuration(mut self, configuration: &dyn Configuration) -> Self {
        debug!(configuration = configuration.name(), "Applying configuration");
        configuration.register(&mut self);
        self
    }

    /// Validates the definitions and creates the context.
    ///
    /// # Errors
    /// - the first registration error, e.g. [`ContextError::DuplicateBean`]
    /// - [`ContextError::NoSuchBean`], [`ContextError::CircularReference`],
    ///   [`ContextError::LifecycleMismatch`] from validation
    /// - in eager mode, any error raised while building a singleton
    #[instrument(skip(self), name = "context_build", fields(beans = self.table.len(), eager = self.eager))]
    pub fn build(self) -> Result<ApplicationContext> {
        if let Some(err) = self.first_error {
            warn!(error = %err, "Bean registration failed");
            return Err(err);
        }

        DefinitionValidator::new(&self.table).validate()?;

        let context = ApplicationContext {
            table: Arc::new(self.table),
            creations: CreationTracker::default(),
        };

        if self.eager {
            let singletons: Vec<BeanKey> = context
                .table
                .sorted()
                .iter()
                .filter(|d| d.lifecycle.is_singleton())
                .map(|d| d.key)
                .collect();

            for key in &singletons {
                BeanLookup::new(&context).get_by_key(key)?;
            }
            debug!(count = singletons.len(), "Pre-instantiated singletons");
        }

        info!(beans = context.bean_count(), "Application context started");
        Ok(context)
    }
}

impl BeanRegistrar for ContextBuilder {
    fn define(&mut self, definition: BeanDefinition) {
        if let Err(err) = self.table.define(definition, self.allow_override) {
            self.first_error.get_or_insert(err);
        }
    }
}

// ============================================================
// ApplicationContext
// ============================================================

/// Validated, immutable set of beans. `Send + Sync`; share it behind an
/// `Arc` when several threads need it.
pub struct ApplicationContext {
    table: Arc<DefinitionTable>,
    creations: CreationTracker,
}

impl ApplicationContext {
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    /// The bean of type `T`.
    ///
    /// ```rust,ignore
    /// let service: Arc<dyn AuthorService> = context.get_bean()?;
    /// ```
    pub fn get_bean<T: Send + Sync + 'static>(&self) -> Result<T> {
        get_bean(&BeanLookup::new(self))
    }

    /// The bean of type `T`, or `None` when no such bean is defined.
    /// Errors from building a defined bean are still returned.
    pub fn get_optional_bean<T: Send + Sync + 'static>(&self) -> Result<Option<T>> {
        get_optional_bean(&BeanLookup::new(self))
    }

    pub fn contains_bean<T: ?Sized + 'static>(&self) -> bool {
        self.table.contains(&BeanKey::of::<T>())
    }

    pub fn bean_count(&self) -> usize {
        self.table.len()
    }

    /// One line per bean: lifecycle, type and declared requirements.
    pub fn describe(&self) -> String {
        let lines: Vec<BeanLine> = self
            .table
            .sorted()
            .into_iter()
            .map(|d| BeanLine {
                lifecycle: d.lifecycle.to_string(),
                bean: d.key.short_name(),
                requires: d.requires.iter().map(BeanKey::short_name).collect(),
            })
            .collect();
        render_bean_report(&lines)
    }

    fn definition(&self, key: &BeanKey, required_by: Option<BeanKey>) -> Result<&BeanDefinition> {
        self.table.get(key).ok_or_else(|| {
            ContextError::NoSuchBean(NoSuchBeanError {
                requested: *key,
                required_by,
                suggestions: suggest_similar(key.type_name(), &self.table.type_names(), 3),
            })
        })
    }
}

impl fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("beans", &self.table.len())
            .finish()
    }
}

// ============================================================
// BeanLookup
// ============================================================

/// One top-level lookup and everything its factories ask for.
///
/// Tracks the beans currently under construction so a factory that
/// (indirectly) asks for itself gets an error instead of recursing.
/// Singletons are also claimed in the context's [`CreationTracker`], which
/// catches the same loop when it spans threads.
struct BeanLookup<'a> {
    context: &'a ApplicationContext,
    in_progress: Mutex<Vec<BeanKey>>,
}

impl<'a> BeanLookup<'a> {
    fn new(context: &'a ApplicationContext) -> Self {
        Self {
            context,
            in_progress: Mutex::new(Vec::new()),
        }
    }
}

impl BeanFactory for BeanLookup<'_> {
    fn get_by_key(&self, key: &BeanKey) -> Result<BeanInstance> {
        let definition = {
            let mut in_progress = self.in_progress.lock();

            if let Some(start) = in_progress.iter().position(|k| k == key) {
                let mut chain = in_progress[start..].to_vec();
                chain.push(*key);
                return Err(circular_reference(chain));
            }

            let definition = self.context.definition(key, in_progress.last().copied())?;
            in_progress.push(*key);
            definition
        };

        // singletons built on other threads are waited for; never in a loop
        let claim = if definition.lifecycle.is_singleton() {
            match self.context.creations.claim(*key) {
                Ok(claim) => Some(claim),
                Err(waits) => {
                    let mut in_progress = self.in_progress.lock();
                    in_progress.pop();
                    return Err(circular_reference(cross_thread_chain(&in_progress, *key, waits)));
                }
            }
        } else {
            None
        };

        trace!(bean = %key, "Creating bean");
        let bean = (definition.factory)(self);
        self.in_progress.lock().pop();
        drop(claim);
        bean
    }

    fn contains_key(&self, key: &BeanKey) -> bool {
        self.context.table.contains(key)
    }
}

fn circular_reference(chain: Vec<BeanKey>) -> ContextError {
    warn!(chain = ?chain, "Bean requested while it is being created");
    ContextError::CircularReference(CircularReferenceError { chain })
}

/// `waits` runs from `key` through beans held by other threads to one
/// this lookup holds; the chain starts at that held bean.
fn cross_thread_chain(in_progress: &[BeanKey], key: BeanKey, waits: Vec<BeanKey>) -> Vec<BeanKey> {
    let held = waits.last().copied().unwrap_or(key);
    let mut chain = match in_progress.iter().position(|k| *k == held) {
        Some(start) => in_progress[start..].to_vec(),
        None => vec![held],
    };
    chain.extend(waits);
    chain
}

// ============================================================
// Typed lookups for use inside factories
// ============================================================

/// The bean of type `T`, from inside a factory.
///
/// ```rust,ignore
/// BeanDefinition::singleton::<Arc<dyn AuthorService>>(|beans| {
///     let repository: Arc<dyn Repository<Author, i64>> = get_bean(beans)?;
///     ...
/// })
/// ```
pub fn get_bean<T: Send + Sync + 'static>(beans: &dyn BeanFactory) -> Result<T> {
    let key = BeanKey::of::<T>();
    let instance = beans.get_by_key(&key)?;
    instance.downcast::<T>().map(|b| *b).map_err(|_| {
        ContextError::BeanCreation {
            key,
            source: format!("factory produced a value that is not {}", type_name::<T>()).into(),
        }
    })
}

/// The bean of type `T` if one is defined, from inside a factory.
pub fn get_optional_bean<T: Send + Sync + 'static>(beans: &dyn BeanFactory) -> Result<Option<T>> {
    if !beans.contains_key(&BeanKey::of::<T>()) {
        trace!(bean = type_name::<T>(), "Optional bean not defined");
        return Ok(None);
    }
    get_bean(beans).map(Some)
}

// ============================================================
// Prelude
// ============================================================

pub mod prelude {
    pub use super::{ApplicationContext, ContextBuilder, get_bean, get_optional_bean};
    pub use crate::configuration::{BeanRegistrar, Configuration};
use crate::creation::CreationTracker;
    pub use crate::error::{ContextError, Result};
    pub use crate::key::BeanKey;
    pub use crate::lifecycle::Lifecycle;
    pub use crate::registry::{BeanDefinition, BeanFactory};
}

// ============================================================
// Tests
// ============================================================
