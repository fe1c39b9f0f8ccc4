//! Running layout over an element tree.

use crate::attributes::LayoutAttributes;
use crate::element::Element;
use crate::environment::Environment;
use crate::path::{Identity, IdentityAssigner};
use crate::rect::Rect;
use std::sync::Arc;

/// A laid-out element and its laid-out children.
#[derive(Debug, Clone)]
pub struct LayoutResultNode {
    pub element: Arc<dyn Element>,

    /// In the parent’s coordinate space.
    pub attributes: LayoutAttributes,

    /// The environment this node was laid out in.
    pub environment: Environment,

    pub children: Vec<(Identity, LayoutResultNode)>,
}

impl LayoutResultNode {
    /// Lays out `element` in `frame`, recursively.
    pub fn layout(
        element: &Arc<dyn Element>,
        frame: Rect,
        environment: &Environment,
    ) -> LayoutResultNode {
        LayoutResultNode::with_attributes(element, LayoutAttributes::new(frame), environment)
    }

    fn with_attributes(
        element: &Arc<dyn Element>,
        attributes: LayoutAttributes,
        environment: &Environment,
    ) -> LayoutResultNode {
        let mut identities = IdentityAssigner::new();
        let children = element
            .layout(attributes.bounds().size, environment)
            .into_iter()
            .map(|child| {
                let identity = identities.next(child.key);
                let node = LayoutResultNode::with_attributes(
                    &child.element,
                    child.attributes,
                    &child.environment,
                );
                (identity, node)
            })
            .collect();

        LayoutResultNode {
            element: Arc::clone(element),
            attributes,
            environment: environment.clone(),
            children,
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|(_, child)| child.node_count())
            .sum::<usize>()
    }
}
