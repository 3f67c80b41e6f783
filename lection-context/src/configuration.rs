//! Configuration modules: groups of related bean definitions.
//!
//! A [`Configuration`] is added to a builder with
//! [`ContextBuilder::add_configuration`](crate::context::ContextBuilder::add_configuration)
//! and writes its definitions through a [`BeanRegistrar`], so it can be
//! exercised against a fake registrar in tests.
//!
//! ```rust
//! use lection_context::prelude::*;
//! use std::sync::Arc;
//!
//! struct Greeting(String);
//!
//! struct GreetingConfiguration;
//!
//! impl Configuration for GreetingConfiguration {
//!     fn register(&self, registrar: &mut dyn BeanRegistrar) {
//!         registrar.define(BeanDefinition::singleton::<Arc<Greeting>>(|_| {
//!             Ok(Arc::new(Greeting("hello".into())))
//!         }));
//!     }
//! }
//!
//! let context = ApplicationContext::builder()
//!     .add_configuration(&GreetingConfiguration)
//!     .build()
//!     .expect("context");
//! let greeting: Arc<Greeting> = context.get_bean().expect("bean");
//! assert_eq!(greeting.0, "hello");
//! ```

use crate::registry::BeanDefinition;

/// A module of bean definitions.
pub trait Configuration: Send + Sync {
    /// Adds this module's beans. Called once per builder.
    fn register(&self, registrar: &mut dyn BeanRegistrar);

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Sink for bean definitions.
pub trait BeanRegistrar {
    fn define(&mut self, definition: BeanDefinition);
}
