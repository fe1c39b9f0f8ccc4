//! Hierarchical configuration passed down the element tree.
//!
//! An [`Environment`] is a value: elements receive it by reference during measurement and layout,
//! and an element that wants its subtree to see something different hands its children an
//! *adapted copy*. Nothing is ever written back up the tree, and siblings never observe each
//! other’s adaptations.

use std::any::{type_name, Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A typed environment key with a declared default.
///
/// ```
/// # use roost::EnvironmentKey;
/// struct DisplayScale;
/// impl EnvironmentKey for DisplayScale {
///     type Value = f64;
///     fn default_value() -> f64 {
///         1.
///     }
/// }
/// ```
pub trait EnvironmentKey: 'static {
    type Value: Any + Clone + Send + Sync;

    /// The value read when no ancestor has set one.
    fn default_value() -> Self::Value;
}

#[derive(Clone)]
struct Entry {
    key_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

/// An immutable-by-default map from environment keys to values.
///
/// Cloning is cheap; the underlying map is shared and only copied when a clone is written to.
#[derive(Clone, Default)]
pub struct Environment {
    values: Arc<BTreeMap<TypeId, Entry>>,
}

impl Environment {
    /// An environment where every key reads its default.
    pub fn empty() -> Environment {
        Environment::default()
    }

    /// Returns the value for `K`, or its default if it was never set.
    pub fn value<K: EnvironmentKey>(&self) -> K::Value {
        self.values
            .get(&TypeId::of::<K>())
            .and_then(|entry| entry.value.downcast_ref::<K::Value>())
            .cloned()
            .unwrap_or_else(K::default_value)
    }

    /// Returns true if `K` was set explicitly.
    pub fn contains<K: EnvironmentKey>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<K>())
    }

    /// Sets the value for `K`.
    ///
    /// Other clones of this environment are unaffected.
    pub fn set<K: EnvironmentKey>(&mut self, value: K::Value) {
        Arc::make_mut(&mut self.values).insert(
            TypeId::of::<K>(),
            Entry {
                key_name: type_name::<K>(),
                value: Arc::new(value),
            },
        );
    }

    /// Removes an explicit value for `K`, so it reads its default again.
    pub fn reset<K: EnvironmentKey>(&mut self) {
        if self.contains::<K>() {
            Arc::make_mut(&mut self.values).remove(&TypeId::of::<K>());
        }
    }

    /// Returns a copy of this environment with `adapt` applied to it.
    pub fn adapted<F: FnOnce(&mut Environment)>(&self, adapt: F) -> Environment {
        let mut environment = self.clone();
        adapt(&mut environment);
        environment
    }

    /// Returns a copy of this environment with one value set.
    pub fn setting<K: EnvironmentKey>(&self, value: K::Value) -> Environment {
        self.adapted(|environment| environment.set::<K>(value))
    }

    /// Number of explicitly set keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns true if both are clones of one another with no writes since.
    pub(crate) fn shares_storage(&self, other: &Environment) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set()
            .entries(self.values.values().map(|entry| entry.key_name))
            .finish()
    }
}
