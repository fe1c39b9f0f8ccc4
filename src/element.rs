//! The element protocol.

use crate::attributes::LayoutAttributes;
use crate::constraint::SizeConstraint;
use crate::environment::Environment;
use crate::rect::{Rect, Size};
use crate::view::ViewDescription;
use core::any::Any;
use core::fmt;
use std::sync::Arc;

/// Elements are immutable descriptions of a piece of UI: how big it wants to be, where its
/// children go, and optionally which native view backs it.
///
/// `Element` implementors should be cheap to create, as they are thrown away after every pass.
/// `measure` and `layout` must be pure functions of their arguments, and must agree with each
/// other: a composite that measures a child under some constraint and environment should lay it
/// out under the same ones.
pub trait Element: Any + fmt::Debug + Send + Sync {
    /// Returns the size this element would like to be within `constraint`.
    ///
    /// The result must be finite on both axes.
    fn measure(&self, constraint: SizeConstraint, environment: &Environment) -> Size;

    /// Places the children of this element within `size`.
    ///
    /// Child attributes are in this element’s coordinate space: its bounds, with the origin at
    /// the top left corner. Each child carries the environment it will be laid out in, which is
    /// where an element adapts the environment for its subtree.
    fn layout(&self, size: Size, environment: &Environment) -> Vec<LayoutChild> {
        let _ = (size, environment);
        Vec::new()
    }

    /// Returns the native view backing this element, if there is one.
    ///
    /// Elements without a view are flattened away; their children end up in the nearest ancestor
    /// that has one.
    fn view_description(&self, context: &ViewDescriptionContext<'_>) -> Option<ViewDescription> {
        let _ = context;
        None
    }
}

/// One child placed by [`Element::layout`].
#[derive(Debug, Clone)]
pub struct LayoutChild {
    /// Identifies the child among its siblings across passes. Unkeyed children are identified by
    /// their order.
    pub key: Option<u64>,

    /// Where the child goes, in the parent’s coordinate space.
    pub attributes: LayoutAttributes,

    /// The environment the child is measured and laid out in.
    pub environment: Environment,

    pub element: Arc<dyn Element>,
}

impl LayoutChild {
    pub fn new(
        element: Arc<dyn Element>,
        attributes: LayoutAttributes,
        environment: &Environment,
    ) -> LayoutChild {
        LayoutChild {
            key: None,
            attributes,
            environment: environment.clone(),
            element,
        }
    }

    pub fn keyed(mut self, key: u64) -> LayoutChild {
        self.key = Some(key);
        self
    }
}

/// Passed to [`Element::view_description`].
#[derive(Debug, Clone, Copy)]
pub struct ViewDescriptionContext<'a> {
    /// The element’s bounds.
    pub bounds: Rect,

    /// The union of the children’s frames, if there are children.
    pub subtree_extent: Option<Rect>,

    pub environment: &'a Environment,
}
