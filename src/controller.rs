//! Live native views and the reconciler that keeps them in sync with content nodes.

use crate::attributes::LayoutAttributes;
use crate::backend::Backend;
use crate::content::{check_unique_children, ContentNode};
use crate::error::RenderError;
use crate::path::ElementPath;
use crate::transition::{Completion, TransitionPhase};
use crate::view::{ViewDescription, ViewId};
use crossbeam::channel::Sender;
use std::collections::HashMap;
use std::mem;

/// What a reconciliation did, by full element path from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: Vec<ElementPath>,
    pub updated: Vec<ElementPath>,
    pub removed: Vec<ElementPath>,
}

impl ReconcileReport {
    /// Returns true if no view was created or removed.
    pub fn is_structurally_unchanged(&self) -> bool {
        self.created.is_empty() && self.removed.is_empty()
    }
}

/// Views playing their disappearing transition, each with the dying views nested inside it.
///
/// Nested entries go away with the view that contains them.
pub(crate) type DyingViews = HashMap<ViewId, Vec<ViewId>>;

/// Forgets a dying view and every dying view nested inside it.
pub(crate) fn release_dying(dying: &mut DyingViews, view: ViewId) {
    if let Some(nested) = dying.remove(&view) {
        for view in nested {
            release_dying(dying, view);
        }
    }
}

/// State shared by one reconciliation.
pub(crate) struct Reconciler<'a> {
    pub(crate) backend: &'a mut dyn Backend,
    /// Where teardown completions of disappearing views are sent.
    pub(crate) teardown: &'a Sender<ViewId>,
    /// Views playing their disappearing transition.
    pub(crate) dying: &'a mut DyingViews,
    pub(crate) report: ReconcileReport,
}

/// Owns one live native view and controllers for its subviews.
#[derive(Debug)]
pub(crate) struct Controller {
    view: ViewId,
    description: ViewDescription,
    attributes: LayoutAttributes,
    children: Vec<(ElementPath, Controller)>,
    /// Former subviews still disappearing out of this view.
    dying: Vec<ViewId>,
}

impl Controller {
    /// Builds the native view for `node`. Subviews are built by the first [`Controller::update`].
    pub(crate) fn build(node: &ContentNode, backend: &mut dyn Backend) -> Controller {
        let view = ViewId::new();
        backend.build(view, &node.description);
        Controller {
            view,
            description: node.description.clone(),
            attributes: node.attributes,
            children: Vec::new(),
            dying: Vec::new(),
        }
    }

    pub(crate) fn view(&self) -> ViewId {
        self.view
    }

    pub(crate) fn attributes(&self) -> LayoutAttributes {
        self.attributes
    }

    /// Sets this view’s attributes without a transition.
    pub(crate) fn set_attributes(&mut self, attributes: LayoutAttributes, backend: &mut dyn Backend) {
        if self.attributes != attributes {
            backend.set_attributes(self.view, &attributes);
            self.attributes = attributes;
        }
    }

    /// Updates this view and its subviews to match `node`.
    ///
    /// `path` is the full path to this controller and is used for reporting only. The node’s own
    /// attributes are left to the caller, which owns the slot this view sits in.
    pub(crate) fn update(
        &mut self,
        path: &ElementPath,
        node: &ContentNode,
        transitions_enabled: bool,
        cx: &mut Reconciler,
    ) -> Result<(), RenderError> {
        if !self.description.is_compatible(&node.description) {
            return Err(RenderError::KindMismatch {
                path: path.clone(),
                current: self.description.kind(),
                new: node.description.kind(),
            });
        }
        // nothing may be touched before the children are known to be unique
        check_unique_children(path, &node.children)?;

        cx.backend.apply(self.view, &node.description);
        self.description = node.description.clone();

        let mut current: Vec<_> = mem::take(&mut self.children)
            .into_iter()
            .map(Some)
            .collect();
        let current_by_path: HashMap<ElementPath, usize> = current
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| entry.as_ref().map(|(path, _)| (path.clone(), i)))
            .collect();

        let mut children = Vec::with_capacity(node.children.len());
        for (index, (child_path, child_node)) in node.children.iter().enumerate() {
            let full_path = path.appending(child_path);

            let reusable = current_by_path.get(child_path).and_then(|i| {
                let compatible = current[*i].as_ref().map_or(false, |(_, controller)| {
                    controller.description.is_compatible(&child_node.description)
                });
                if compatible {
                    current[*i].take()
                } else {
                    None
                }
            });

            let controller = match reusable {
                Some((_, mut controller)) => {
                    // exists with the same kind; can be updated in place
                    cx.backend.insert_subview(self.view, controller.view, index);
                    controller.transition_to(child_node, transitions_enabled, cx);
                    cx.report.updated.push(full_path.clone());
                    controller.update(&full_path, child_node, transitions_enabled, cx)?;
                    controller
                }
                None => {
                    // does not exist or has changed kind; needs to be created
                    let mut controller = Controller::build(child_node, cx.backend);
                    tracing::trace!(path = %full_path, view = %controller.view, "created view");
                    cx.backend.set_attributes(controller.view, &child_node.attributes);
                    cx.backend.insert_subview(self.view, controller.view, index);
                    cx.report.created.push(full_path.clone());
                    // a new subtree is built in place, without transitions of its own
                    controller.update(&full_path, child_node, false, cx)?;

                    if transitions_enabled {
                        if let Some(transition) = child_node.description.appearing_transition() {
                            transition.perform(
                                cx.backend,
                                controller.view,
                                TransitionPhase::Appearing {
                                    to: &child_node.attributes,
                                },
                                Completion::none(),
                            );
                        }
                    }
                    controller
                }
            };
            children.push((child_path.clone(), controller));
        }

        // whatever wasn’t reused is gone
        self.dying.retain(|view| cx.dying.contains_key(view));
        for (child_path, controller) in current.into_iter().flatten() {
            let full_path = path.appending(&child_path);
            tracing::trace!(path = %full_path, view = %controller.view, "removing view");
            if let Some(view) = controller.remove(transitions_enabled, cx) {
                self.dying.push(view);
            }
            cx.report.removed.push(full_path);
        }

        self.children = children;
        Ok(())
    }

    /// Moves a reused view to the attributes of `node`, through the node’s layout transition if
    /// it has one.
    fn transition_to(&mut self, node: &ContentNode, transitions_enabled: bool, cx: &mut Reconciler) {
        let attributes = node.attributes;
        if self.attributes == attributes {
            return;
        }
        match node.description.layout_transition() {
            Some(transition) if transitions_enabled => transition.perform(
                cx.backend,
                self.view,
                TransitionPhase::Changing {
                    from: &self.attributes,
                    to: &attributes,
                },
                Completion::none(),
            ),
            _ => cx.backend.set_attributes(self.view, &attributes),
        }
        self.attributes = attributes;
    }

    /// Removes this view, playing its disappearing transition first if it has one.
    ///
    /// Returns the view if it is still disappearing.
    fn remove(self, transitions_enabled: bool, cx: &mut Reconciler) -> Option<ViewId> {
        let mut nested = Vec::new();
        self.collect_dying(cx.dying, &mut nested);

        let transition = self
            .description
            .disappearing_transition()
            .filter(|_| transitions_enabled);
        match transition {
            Some(transition) => {
                cx.dying.insert(self.view, nested);
                let completion = Completion::teardown(self.view, cx.teardown.clone());
                transition.perform(
                    cx.backend,
                    self.view,
                    TransitionPhase::Disappearing {
                        from: &self.attributes,
                    },
                    completion,
                );
                Some(self.view)
            }
            None => {
                // releases the nested dying views too
                cx.backend.remove(self.view);
                for view in nested {
                    release_dying(cx.dying, view);
                }
                None
            }
        }
    }

    /// Appends dying views anywhere in this subtree that haven't been torn down yet.
    fn collect_dying(&self, dying: &DyingViews, out: &mut Vec<ViewId>) {
        out.extend(self.dying.iter().filter(|view| dying.contains_key(*view)));
        for (_, child) in &self.children {
            child.collect_dying(dying, out);
        }
    }

    /// Appends the full paths of all descendants, depth-first.
    pub(crate) fn collect_paths(&self, path: &ElementPath, paths: &mut Vec<ElementPath>) {
        for (child_path, child) in &self.children {
            let full_path = path.appending(child_path);
            paths.push(full_path.clone());
            child.collect_paths(&full_path, paths);
        }
    }

    /// Looks up the view at a full path.
    pub(crate) fn view_at(&self, path: &ElementPath) -> Option<ViewId> {
        if path.is_empty() {
            return Some(self.view);
        }
        let identities = path.identities();
        self.children.iter().find_map(|(child_path, child)| {
            let len = child_path.identities().len();
            if identities.len() >= len && identities[..len] == *child_path.identities() {
                child.view_at(&ElementPath::from(identities[len..].to_vec()))
            } else {
                None
            }
        })
    }
}
