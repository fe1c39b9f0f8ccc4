//! Retained view-tree rendering engine.
//!
//! # Conceptual overview
//! Roost turns a declarative tree of elements into a hierarchy of native views and keeps that
//! hierarchy up to date as the elements change.
//!
//! ## Elements
//! An [`Element`] is an immutable description of a piece of UI. It can measure itself under a
//! [`SizeConstraint`], place its children within a size it was given, and optionally name a
//! native view that backs it through a [`ViewDescription`]. Elements are cheap to create and are
//! thrown away after every pass; nothing about them is retained.
//!
//! ## Environment
//! Lateral parameters (a theme, a display scale) travel down the tree in an [`Environment`]
//! instead of through every element’s properties. Elements read typed values with
//! [`Environment::value`] and may hand their children an adapted copy. Adaptations never leak to
//! siblings or ancestors.
//!
//! ## Passes
//! A [`Host`] owns a root view and runs passes, one at a time:
//!
//! 1. *Layout* walks the element tree top-down. Each element places its children in its own
//!    coordinate space; children get identities from their keys or their order.
//! 2. *Resolution* drops elements without a native view, hoisting their children into the
//!    nearest ancestor that has one. A native view’s slot is then named by the [`ElementPath`]
//!    through the flattened elements.
//! 3. *Reconciliation* walks the result against the retained controllers, updating views in place
//!    where the path and the view kind match, creating and removing them otherwise, and playing
//!    [transitions](Transition) along the way.
//!
//! If nothing changed since the last pass, a pass does nothing.
//!
//! ## Coordinate System
//! The origin is at the top left corner of a view’s bounds and positive y points down. A node’s
//! [`LayoutAttributes`] are always in its parent’s coordinate space: its center, the size of its
//! bounds, a 3D transform about the center and an alpha value.

mod adapters;
mod attributes;
mod backend;
mod config;
mod constraint;
mod content;
mod controller;
mod element;
mod environment;
mod error;
mod host;
mod layout;
mod path;
mod rect;
mod transform;
mod transition;
mod view;

#[cfg(test)]
mod testing;

pub use adapters::{AdaptedEnvironment, EnvironmentReader};
pub use attributes::LayoutAttributes;
pub use backend::Backend;
pub use config::{DebugOptions, RenderConfig, Subscription, SubscriptionId};
pub use constraint::{Axis, SizeConstraint};
pub use content::ContentNode;
pub use controller::ReconcileReport;
pub use element::{Element, LayoutChild, ViewDescriptionContext};
pub use environment::{Environment, EnvironmentKey};
pub use error::{GeometryError, RenderError};
pub use host::{Host, PassOutcome, PassState};
pub use layout::LayoutResultNode;
pub use path::{ElementPath, Identity, IdentityAssigner};
pub use rect::{Rect, Size};
pub use transform::Transform3D;
pub use transition::{Animation, Completion, Transition, TransitionPhase, VisibilityTransition};
pub use view::{PassthroughView, ViewDescription, ViewId, ViewKind};
