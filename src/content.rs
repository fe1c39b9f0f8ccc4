//! Resolving layout results into the tree of native views.

use crate::attributes::LayoutAttributes;
use crate::element::ViewDescriptionContext;
use crate::error::RenderError;
use crate::layout::LayoutResultNode;
use crate::path::ElementPath;
use crate::rect::Rect;
use crate::view::ViewDescription;
use std::collections::HashSet;

/// A native view as the next pass wants it.
///
/// Children are keyed by the element path from this node to them, which skips over any elements
/// that were flattened away.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentNode {
    pub description: ViewDescription,

    /// Relative to the nearest ancestor content node.
    pub attributes: LayoutAttributes,

    pub children: Vec<(ElementPath, ContentNode)>,
}

impl ContentNode {
    /// Checks that no content node has two children with the same path.
    pub fn validate(&self) -> Result<(), RenderError> {
        self.validate_at(&ElementPath::empty())
    }

    fn validate_at(&self, path: &ElementPath) -> Result<(), RenderError> {
        check_unique_children(path, &self.children)?;
        for (child_path, child) in &self.children {
            child.validate_at(&path.appending(child_path))?;
        }
        Ok(())
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

/// Fails with the first path that occurs twice among `children`.
pub(crate) fn check_unique_children(
    parent: &ElementPath,
    children: &[(ElementPath, ContentNode)],
) -> Result<(), RenderError> {
    let mut seen = HashSet::with_capacity(children.len());
    for (path, _) in children {
        if !seen.insert(path) {
            return Err(RenderError::DuplicateIdentity {
                parent: parent.clone(),
                path: path.clone(),
            });
        }
    }
    Ok(())
}

impl LayoutResultNode {
    /// Turns this subtree into content nodes, in depth-first order.
    ///
    /// A node with a view description becomes a single content node at the empty path, holding
    /// its resolved children. A node without one disappears: its resolved children are hoisted
    /// into the result, with their attributes expressed in this node’s parent space and this
    /// node’s identity prepended to their paths.
    pub fn resolve(&self) -> Vec<(ElementPath, ContentNode)> {
        let children: Vec<_> = self
            .children
            .iter()
            .flat_map(|(identity, child)| {
                child
                    .resolve()
                    .into_iter()
                    .map(move |(path, node)| (path.prepending(*identity), node))
            })
            .collect();

        let subtree_extent = self
            .children
            .iter()
            .map(|(_, child)| child.attributes.frame())
            .fold(None, |extent: Option<Rect>, frame| {
                Some(extent.map_or(frame, |extent| extent.union(frame)))
            });

        let context = ViewDescriptionContext {
            bounds: self.attributes.bounds(),
            subtree_extent,
            environment: &self.environment,
        };

        match self.element.view_description(&context) {
            Some(description) => vec![(
                ElementPath::empty(),
                ContentNode {
                    description,
                    attributes: self.attributes,
                    children,
                },
            )],
            None => children
                .into_iter()
                .map(|(path, mut node)| {
                    node.attributes = node.attributes.within(&self.attributes);
                    (path, node)
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::environment::Environment;
    use crate::path::Identity;
    use crate::testing::{Column, Leaf, Panel};
    use cgmath::{Point2, Vector2};
    use std::sync::Arc;

    fn lay_out(element: Arc<dyn Element>) -> LayoutResultNode {
        LayoutResultNode::layout(
            &element,
            Rect::from_size(Vector2::new(100., 100.)),
            &Environment::empty(),
        )
    }

    fn path(identities: &[Identity]) -> ElementPath {
        ElementPath::from(identities.to_vec())
    }

    #[test]
    fn flattens_elements_without_views() {
        let root = lay_out(Arc::new(
            Column::new()
                .child(Leaf::new("a", 10., 10.))
                .child(Column::new().keyed(4, Leaf::new("b", 10., 10.)))
                .child(Leaf::new("c", 10., 10.)),
        ));
        let resolved = root.resolve();

        let paths: Vec<_> = resolved.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(
            paths,
            vec![
                path(&[Identity::Auto(0)]),
                path(&[Identity::Auto(1), Identity::Key(4)]),
                path(&[Identity::Auto(2)]),
            ]
        );

        // the nested column sits at y = 10, so its child does too
        let frame = resolved[1].1.attributes.frame();
        assert_eq!(frame, Rect::new(Point2::new(0., 10.), Vector2::new(10., 10.)));
        assert!(resolved.iter().all(|(_, node)| node.children.is_empty()));
    }

    #[test]
    fn views_keep_their_children() {
        let root = lay_out(Arc::new(Panel::new(
            "panel",
            5.,
            Column::new()
                .child(Leaf::new("a", 10., 10.))
                .child(Leaf::new("b", 10., 10.)),
        )));
        let resolved = root.resolve();

        assert_eq!(resolved.len(), 1);
        let (panel_path, panel) = &resolved[0];
        assert!(panel_path.is_empty());
        let child_paths: Vec<_> = panel.children.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(
            child_paths,
            vec![
                path(&[Identity::Auto(0), Identity::Auto(0)]),
                path(&[Identity::Auto(0), Identity::Auto(1)]),
            ]
        );
        // relative to the panel, inset by 5
        assert_eq!(
            panel.children[1].1.attributes.frame(),
            Rect::new(Point2::new(5., 15.), Vector2::new(10., 10.))
        );
        assert_eq!(panel.node_count(), 3);
    }

    #[test]
    fn resolution_is_pure() {
        let root = lay_out(Arc::new(
            Column::new()
                .child(Leaf::new("a", 10., 10.))
                .child(Panel::new("p", 2., Leaf::new("b", 3., 3.))),
        ));
        let first = root.resolve();
        let second = root.resolve();
        assert_eq!(first, second);
    }

    #[test]
    fn validation_finds_duplicates() {
        let root = lay_out(Arc::new(
            Column::new()
                .keyed(1, Leaf::new("a", 10., 10.))
                .keyed(1, Leaf::new("b", 10., 10.)),
        ));
        let content = ContentNode {
            description: ViewDescription::new(crate::view::PassthroughView),
            attributes: LayoutAttributes::default(),
            children: root.resolve(),
        };
        assert_eq!(
            content.validate(),
            Err(RenderError::DuplicateIdentity {
                parent: ElementPath::empty(),
                path: path(&[Identity::Key(1)]),
            })
        );
    }
}
