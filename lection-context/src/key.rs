//! Bean identification.
//!
//! A [`BeanKey`] names a bean by its Rust type. Two registrations of the
//! same type collide; trait objects are distinct types and make good keys
//! (`Arc<dyn PrettyPrinter>` is a different bean from `Arc<CapitalizePrettyPrinter>`).

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use lection_support::rendering::shorten_type_name;

/// Identifies a bean inside an [`ApplicationContext`](crate::context::ApplicationContext).
///
/// # Examples
/// ```
/// use lection_context::key::BeanKey;
///
/// let key = BeanKey::of::<String>();
/// assert_eq!(key.type_name(), "alloc::string::String");
/// assert_eq!(key.short_name(), "String");
/// ```
#[derive(Clone, Copy)]
pub struct BeanKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl BeanKey {
    /// Key for beans of type `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name without module paths, for logs and reports.
    pub fn short_name(&self) -> String {
        shorten_type_name(self.type_name)
    }
}

// type_name is informational only; identity is the TypeId
impl PartialEq for BeanKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for BeanKey {}

impl Hash for BeanKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for BeanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BeanKey({})", self.type_name)
    }
}

impl fmt::Display for BeanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    trait Printer {}
    struct Capitalize;
    impl Printer for Capitalize {}

    #[test]
    fn same_type_same_key() {
        assert_eq!(BeanKey::of::<i64>(), BeanKey::of::<i64>());
    }

    #[test]
    fn trait_object_and_impl_are_different_beans() {
        assert_ne!(
            BeanKey::of::<Arc<dyn Printer>>(),
            BeanKey::of::<Arc<Capitalize>>()
        );
    }

    #[test]
    fn display_is_short() {
        let key = BeanKey::of::<Arc<dyn Printer>>();
        assert_eq!(key.to_string(), "Arc<dyn Printer>");
        assert!(format!("{key:?}").contains("::"));
    }

    #[test]
    fn usable_in_sets() {
        let set: HashSet<BeanKey> = [BeanKey::of::<String>(), BeanKey::of::<String>(), BeanKey::of::<u8>()]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }
}
