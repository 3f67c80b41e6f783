//! Build-time checks over declared bean requirements.
//!
//! Run once by [`ContextBuilder::build`](crate::context::ContextBuilder::build):
//! - every required bean is defined
//! - requirements contain no cycle
//! - no singleton requires a prototype
//!
//! Requirements a factory resolves without declaring them are not seen
//! here; the context catches loops among those at lookup time.

use std::collections::HashSet;

use lection_support::rendering::suggest_similar;
use tracing::{debug, instrument, warn};

use crate::error::{
    CircularReferenceError, ContextError, LifecycleMismatchError, NoSuchBeanError, Result,
};
use crate::key::BeanKey;
use crate::registry::{BeanDefinition, DefinitionTable};

/// Depth-first walk over the definition table.
pub(crate) struct DefinitionValidator<'a> {
    table: &'a DefinitionTable,
    on_path: HashSet<BeanKey>,
    done: HashSet<BeanKey>,
    path: Vec<BeanKey>,
}

impl<'a> DefinitionValidator<'a> {
    pub fn new(table: &'a DefinitionTable) -> Self {
        Self {
            table,
            on_path: HashSet::new(),
            done: HashSet::new(),
            path: Vec::new(),
        }
    }

    #[instrument(skip(self), name = "validate_definitions")]
    pub fn validate(&mut self) -> Result<()> {
        let roots: Vec<BeanKey> = self.table.sorted().iter().map(|d| d.key).collect();
        debug!(beans = roots.len(), "Validating bean definitions");

        for key in roots {
            self.visit(key)?;
        }

        debug!("Bean definitions are consistent");
        Ok(())
    }

    fn visit(&mut self, key: BeanKey) -> Result<()> {
        if self.done.contains(&key) {
            return Ok(());
        }

        if self.on_path.contains(&key) {
            let start = self.path.iter().position(|k| *k == key).unwrap_or(0);
            let mut chain = self.path[start..].to_vec();
            chain.push(key);

            warn!(chain = ?chain, "Circular reference between bean definitions");
            return Err(ContextError::CircularReference(CircularReferenceError {
                chain,
            }));
        }

        let table = self.table;
        let definition = table.get(&key).ok_or_else(|| self.missing(key))?;

        self.on_path.insert(key);
        self.path.push(key);

        for required in &definition.requires {
            if let Some(dependency) = table.get(required) {
                check_lifecycles(definition, dependency)?;
            }
            self.visit(*required)?;
        }

        self.path.pop();
        self.on_path.remove(&key);
        self.done.insert(key);
        Ok(())
    }

    fn missing(&self, key: BeanKey) -> ContextError {
        let required_by = self.path.last().copied();
        warn!(bean = %key, required_by = ?required_by, "Required bean is not defined");

        ContextError::NoSuchBean(NoSuchBeanError {
            requested: key,
            required_by,
            suggestions: suggest_similar(key.type_name(), &self.table.type_names(), 3),
        })
    }
}

/// A consumer must not outlive what it requires.
fn check_lifecycles(consumer: &BeanDefinition, dependency: &BeanDefinition) -> Result<()> {
    if consumer.lifecycle > dependency.lifecycle {
        warn!(
            consumer = %consumer.key,
            dependency = %dependency.key,
            "Singleton requires a prototype"
        );
        return Err(ContextError::LifecycleMismatch(LifecycleMismatchError {
            consumer: consumer.key,
            consumer_lifecycle: consumer.lifecycle,
            dependency: dependency.key,
            dependency_lifecycle: dependency.lifecycle,
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Lifecycle;
    use crate::registry::{BeanFactory, BeanInstance};
    use std::sync::Arc;

    struct Repository;
    struct Printer;
    struct AuthorService;

    fn table(defs: Vec<(BeanKey, Lifecycle, Vec<BeanKey>)>) -> DefinitionTable {
        let mut table = DefinitionTable::new();
        for (key, lifecycle, requires) in defs {
            table
                .define(
                    BeanDefinition {
                        key,
                        lifecycle,
                        requires,
                        factory: Arc::new(|_: &dyn BeanFactory| Ok(Box::new(()) as BeanInstance)),
                    },
                    false,
                )
                .unwrap();
        }
        table
    }

    #[test]
    fn service_over_repository_is_valid() {
        let t = table(vec![
            (BeanKey::of::<Repository>(), Lifecycle::Singleton, vec![]),
            (BeanKey::of::<Printer>(), Lifecycle::Singleton, vec![]),
            (
                BeanKey::of::<AuthorService>(),
                Lifecycle::Singleton,
                vec![BeanKey::of::<Repository>(), BeanKey::of::<Printer>()],
            ),
        ]);
        assert!(DefinitionValidator::new(&t).validate().is_ok());
    }

    #[test]
    fn missing_requirement_names_consumer() {
        let t = table(vec![(
            BeanKey::of::<AuthorService>(),
            Lifecycle::Singleton,
            vec![BeanKey::of::<Repository>()],
        )]);

        match DefinitionValidator::new(&t).validate().unwrap_err() {
            ContextError::NoSuchBean(err) => {
                assert_eq!(err.requested, BeanKey::of::<Repository>());
                assert_eq!(err.required_by, Some(BeanKey::of::<AuthorService>()));
            }
            other => panic!("expected NoSuchBean, got {other:?}"),
        }
    }

    #[test]
    fn cycle_is_reported_with_chain() {
        let t = table(vec![
            (
                BeanKey::of::<AuthorService>(),
                Lifecycle::Prototype,
                vec![BeanKey::of::<Repository>()],
            ),
            (
                BeanKey::of::<Repository>(),
                Lifecycle::Prototype,
                vec![BeanKey::of::<AuthorService>()],
            ),
        ]);

        match DefinitionValidator::new(&t).validate().unwrap_err() {
            ContextError::CircularReference(err) => {
                assert_eq!(err.chain.len(), 3);
                assert_eq!(err.chain.first(), err.chain.last());
            }
            other => panic!("expected CircularReference, got {other:?}"),
        }
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let t = table(vec![(
            BeanKey::of::<Printer>(),
            Lifecycle::Prototype,
            vec![BeanKey::of::<Printer>()],
        )]);
        assert!(matches!(
            DefinitionValidator::new(&t).validate(),
            Err(ContextError::CircularReference(_))
        ));
    }

    #[test]
    fn singleton_requiring_prototype_rejected() {
        let t = table(vec![
            (BeanKey::of::<Repository>(), Lifecycle::Prototype, vec![]),
            (
                BeanKey::of::<AuthorService>(),
                Lifecycle::Singleton,
                vec![BeanKey::of::<Repository>()],
            ),
        ]);

        match DefinitionValidator::new(&t).validate().unwrap_err() {
            ContextError::LifecycleMismatch(err) => {
                assert_eq!(err.consumer_lifecycle, Lifecycle::Singleton);
                assert_eq!(err.dependency_lifecycle, Lifecycle::Prototype);
            }
            other => panic!("expected LifecycleMismatch, got {other:?}"),
        }
    }

    #[test]
    fn prototype_requiring_singleton_ok() {
        let t = table(vec![
            (BeanKey::of::<Repository>(), Lifecycle::Singleton, vec![]),
            (
                BeanKey::of::<AuthorService>(),
                Lifecycle::Prototype,
                vec![BeanKey::of::<Repository>()],
            ),
        ]);
        assert!(DefinitionValidator::new(&t).validate().is_ok());
    }

    #[test]
    fn shared_requirement_is_not_a_cycle() {
        struct Left;
        struct Right;

        let t = table(vec![
            (BeanKey::of::<Repository>(), Lifecycle::Singleton, vec![]),
            (BeanKey::of::<Left>(), Lifecycle::Singleton, vec![BeanKey::of::<Repository>()]),
            (BeanKey::of::<Right>(), Lifecycle::Singleton, vec![BeanKey::of::<Repository>()]),
            (
                BeanKey::of::<AuthorService>(),
                Lifecycle::Singleton,
                vec![BeanKey::of::<Left>(), BeanKey::of::<Right>()],
            ),
        ]);
        assert!(DefinitionValidator::new(&t).validate().is_ok());
    }
}
