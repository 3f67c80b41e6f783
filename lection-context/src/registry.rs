//! Bean definitions and the table that holds them.
//!
//! A [`BeanDefinition`] pairs a [`BeanKey`] with a type-erased factory.
//! Factories receive a [`BeanFactory`] so they can look up their own
//! collaborators.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::{ContextError, Result};
use crate::key::BeanKey;
use crate::lifecycle::Lifecycle;

/// Type-erased bean instance.
pub type BeanInstance = Box<dyn Any + Send + Sync>;

/// Factory stored for each bean. Shared, since the context is `Sync`.
pub type FactoryFn = Arc<dyn Fn(&dyn BeanFactory) -> Result<BeanInstance> + Send + Sync>;

/// What a factory sees of the context while it builds a bean.
pub trait BeanFactory: Send + Sync {
    /// Produces the bean registered under `key`.
    fn get_by_key(&self, key: &BeanKey) -> Result<BeanInstance>;

    /// Whether anything is registered under `key`.
    fn contains_key(&self, key: &BeanKey) -> bool;
}

/// How to build one bean, and what it needs.
///
/// ```
/// use lection_context::registry::BeanDefinition;
/// use lection_context::lifecycle::Lifecycle;
///
/// let definition = BeanDefinition::prototype::<String>(|_| Ok(String::from("plato")))
///     .requiring::<u64>();
/// assert_eq!(definition.lifecycle, Lifecycle::Prototype);
/// assert_eq!(definition.requires.len(), 1);
/// ```
#[derive(Clone)]
pub struct BeanDefinition {
    pub key: BeanKey,
    pub lifecycle: Lifecycle,
    /// Beans this one cannot be built without; checked at build time.
    pub requires: Vec<BeanKey>,
    pub factory: FactoryFn,
}

impl BeanDefinition {
    /// A singleton built by `factory` on first lookup.
    ///
    /// The factory runs at most once per definition; every lookup
    /// clones the cached value, so services are usually `Arc<..>`.
    pub fn singleton<T: Clone + Send + Sync + 'static>(
        factory: impl Fn(&dyn BeanFactory) -> Result<T> + Send + Sync + 'static,
    ) -> Self {
        let cell: Arc<OnceCell<T>> = Arc::new(OnceCell::new());
        Self {
            key: BeanKey::of::<T>(),
            lifecycle: Lifecycle::Singleton,
            requires: Vec::new(),
            factory: Arc::new(move |beans: &dyn BeanFactory| {
                let value = cell.get_or_try_init(|| factory(beans))?;
                Ok(Box::new(value.clone()) as BeanInstance)
            }),
        }
    }

    /// A singleton that already exists.
    pub fn singleton_value<T: Clone + Send + Sync + 'static>(value: T) -> Self {
        Self {
            key: BeanKey::of::<T>(),
            lifecycle: Lifecycle::Singleton,
            requires: Vec::new(),
            factory: Arc::new(move |_: &dyn BeanFactory| Ok(Box::new(value.clone()) as BeanInstance)),
        }
    }

    /// A bean built anew by `factory` on every lookup.
    pub fn prototype<T: Send + Sync + 'static>(
        factory: impl Fn(&dyn BeanFactory) -> Result<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: BeanKey::of::<T>(),
            lifecycle: Lifecycle::Prototype,
            requires: Vec::new(),
            factory: Arc::new(move |beans: &dyn BeanFactory| {
                Ok(Box::new(factory(beans)?) as BeanInstance)
            }),
        }
    }

    /// Declares that this bean cannot be built without a `U` bean.
    pub fn requiring<U: ?Sized + 'static>(mut self) -> Self {
        self.requires.push(BeanKey::of::<U>());
        self
    }
}

impl std::fmt::Debug for BeanDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeanDefinition")
            .field("key", &self.key)
            .field("lifecycle", &self.lifecycle)
            .field("requires", &self.requires)
            .finish_non_exhaustive()
    }
}

/// All definitions of one context, keyed by bean type.
#[derive(Debug, Default)]
pub(crate) struct DefinitionTable {
    definitions: HashMap<BeanKey, BeanDefinition>,
}

impl DefinitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition.
    ///
    /// # Errors
    /// [`ContextError::DuplicateBean`] when the type is already defined
    /// and `allow_override` is off.
    pub fn define(&mut self, definition: BeanDefinition, allow_override: bool) -> Result<()> {
        let key = definition.key;

        if self.definitions.contains_key(&key) {
            if !allow_override {
                return Err(ContextError::DuplicateBean { key });
            }
            debug!(bean = %key, "Overriding bean definition");
        } else {
            debug!(bean = %key, lifecycle = %definition.lifecycle, "Defined bean");
        }

        self.definitions.insert(key, definition);
        Ok(())
    }

    pub fn get(&self, key: &BeanKey) -> Option<&BeanDefinition> {
        self.definitions.get(key)
    }

    pub fn contains(&self, key: &BeanKey) -> bool {
        self.definitions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Definitions ordered by type name, so reports and eager startup
    /// are deterministic.
    pub fn sorted(&self) -> Vec<&BeanDefinition> {
        let mut defs: Vec<_> = self.definitions.values().collect();
        defs.sort_by_key(|d| d.key.type_name());
        defs
    }

    pub fn type_names(&self) -> Vec<&'static str> {
        self.definitions.keys().map(BeanKey::type_name).collect()
    }
}
