//! Descriptions of native views.

use crate::transition::Transition;
use core::any::{type_name, Any, TypeId};
use core::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// A unique identifier for a live native view.
///
/// (this is just a UUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(Uuid);

impl ViewId {
    pub(crate) fn new() -> ViewId {
        ViewId(Uuid::new_v4())
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of native view a description produces.
///
/// A live view can only be updated in place from descriptions of its own kind. The kind is the
/// type of the description’s properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewKind {
    type_id: TypeId,
    name: &'static str,
}

impl ViewKind {
    pub fn of<T: Any>() -> ViewKind {
        ViewKind {
            type_id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Properties of the host’s root view: a plain container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassthroughView;

fn properties_eq<T: Any + PartialEq>(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Describes one native view: its kind, the properties to apply to it, and how it animates in,
/// out, and between layouts.
///
/// The properties are opaque to the engine; the [`Backend`](crate::Backend) downcasts them by
/// kind to build and configure its views.
#[derive(Clone)]
pub struct ViewDescription {
    kind: ViewKind,
    properties: Arc<dyn Any + Send + Sync>,
    properties_eq: fn(&dyn Any, &dyn Any) -> bool,
    appearing: Option<Arc<dyn Transition>>,
    disappearing: Option<Arc<dyn Transition>>,
    layout_transition: Option<Arc<dyn Transition>>,
}

impl ViewDescription {
    pub fn new<T: Any + PartialEq + Send + Sync>(properties: T) -> ViewDescription {
        ViewDescription {
            kind: ViewKind::of::<T>(),
            properties: Arc::new(properties),
            properties_eq: properties_eq::<T>,
            appearing: None,
            disappearing: None,
            layout_transition: None,
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    /// Returns the properties if they are of type `T`.
    pub fn properties<T: Any>(&self) -> Option<&T> {
        self.properties.downcast_ref::<T>()
    }

    /// Returns true if a view built from `self` may be updated in place with `other`.
    pub fn is_compatible(&self, other: &ViewDescription) -> bool {
        self.kind == other.kind
    }

    /// Played on views created during a pass with transitions enabled.
    pub fn with_appearing_transition<T: Transition + 'static>(mut self, transition: T) -> Self {
        self.appearing = Some(Arc::new(transition));
        self
    }

    /// Played on views whose identity vanished; the view is removed once it completes.
    pub fn with_disappearing_transition<T: Transition + 'static>(mut self, transition: T) -> Self {
        self.disappearing = Some(Arc::new(transition));
        self
    }

    /// Played on reused views whose layout attributes changed.
    pub fn with_layout_transition<T: Transition + 'static>(mut self, transition: T) -> Self {
        self.layout_transition = Some(Arc::new(transition));
        self
    }

    pub fn appearing_transition(&self) -> Option<&dyn Transition> {
        self.appearing.as_deref()
    }

    pub fn disappearing_transition(&self) -> Option<&dyn Transition> {
        self.disappearing.as_deref()
    }

    pub fn layout_transition(&self) -> Option<&dyn Transition> {
        self.layout_transition.as_deref()
    }
}

/// Compares kinds and properties. Transitions are not compared.
impl PartialEq for ViewDescription {
    fn eq(&self, other: &ViewDescription) -> bool {
        self.kind == other.kind && (self.properties_eq)(&*self.properties, &*other.properties)
    }
}

impl fmt::Debug for ViewDescription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ViewDescription")
            .field("kind", &self.kind.name)
            .field("appearing", &self.appearing)
            .field("disappearing", &self.disappearing)
            .field("layout_transition", &self.layout_transition)
            .finish()
    }
}
