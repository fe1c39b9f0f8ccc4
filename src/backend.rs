//! Traits for backends.

use crate::attributes::LayoutAttributes;
use crate::transition::{Animation, Completion};
use crate::view::{ViewDescription, ViewId};

/// A backend implementation: the platform’s native views, driven by the reconciler.
///
/// Views are named by [`ViewId`]s handed out by the engine; the backend keeps the actual native
/// objects. All methods are called on the thread that owns the host.
pub trait Backend {
    /// Creates a new, detached view from a description.
    fn build(&mut self, view: ViewId, description: &ViewDescription);

    /// Applies a description to an existing view. The description is always of the kind the view
    /// was built from.
    fn apply(&mut self, view: ViewId, description: &ViewDescription);

    /// Inserts `subview` into the content container of `superview` at `index`, moving it if it is
    /// attached already.
    fn insert_subview(&mut self, superview: ViewId, subview: ViewId, index: usize);

    /// Sets a view’s geometry without animation.
    fn set_attributes(&mut self, view: ViewId, attributes: &LayoutAttributes);

    /// Animates a view’s geometry from `from` to `to` and calls `completion` when done.
    ///
    /// The default implementation doesn’t animate.
    fn animate(
        &mut self,
        view: ViewId,
        from: &LayoutAttributes,
        to: &LayoutAttributes,
        animation: Animation,
        completion: Completion,
    ) {
        let _ = (from, animation);
        self.set_attributes(view, to);
        completion.complete();
    }

    /// Detaches a view from its superview and releases it, along with its subviews.
    fn remove(&mut self, view: ViewId);
}
