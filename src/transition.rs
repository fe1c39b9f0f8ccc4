//! Appearing, disappearing and layout transitions.

use crate::attributes::LayoutAttributes;
use crate::backend::Backend;
use crate::transform::Transform3D;
use crate::view::ViewId;
use crossbeam::channel::Sender;
use std::fmt;
use std::time::Duration;

/// What a transition is asked to animate.
#[derive(Debug, Clone, Copy)]
pub enum TransitionPhase<'a> {
    /// The view was just created and already sits at `to`.
    Appearing { to: &'a LayoutAttributes },
    /// The view’s identity vanished. It currently sits at `from`.
    Disappearing { from: &'a LayoutAttributes },
    /// A reused view moved from `from` to `to`.
    Changing {
        from: &'a LayoutAttributes,
        to: &'a LayoutAttributes,
    },
}

/// A transition policy attached to a [`ViewDescription`](crate::ViewDescription).
///
/// Transitions are fire-and-forget. `perform` must call [`Completion::complete`] exactly once,
/// either right away or when the animation finishes. For disappearing views the completion is
/// what finally removes the view; if it is never called, the view stays around.
pub trait Transition: fmt::Debug + Send + Sync {
    fn perform(
        &self,
        backend: &mut dyn Backend,
        view: ViewId,
        phase: TransitionPhase<'_>,
        completion: Completion,
    );
}

/// One-shot completion handle for a transition.
///
/// Completing never touches the view tree directly; a teardown is queued and carried out by the
/// host the next time it polls.
#[derive(Debug)]
pub struct Completion {
    teardown: Option<(ViewId, Sender<ViewId>)>,
}

impl Completion {
    /// A completion that does nothing.
    pub fn none() -> Completion {
        Completion { teardown: None }
    }

    pub(crate) fn teardown(view: ViewId, sender: Sender<ViewId>) -> Completion {
        Completion {
            teardown: Some((view, sender)),
        }
    }

    /// Returns true if completing will remove a view.
    pub fn removes_view(&self) -> bool {
        self.teardown.is_some()
    }

    pub fn complete(self) {
        if let Some((view, sender)) = self.teardown {
            if sender.send(view).is_err() {
                tracing::warn!(%view, "teardown completion arrived after its host was dropped");
            }
        }
    }
}

/// Animation timing handed to the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub duration: Duration,
}

impl Animation {
    pub fn new(duration: Duration) -> Animation {
        Animation { duration }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Animation::new(Duration::from_millis(250))
    }
}

/// Animates layout changes; appearing and disappearing are immediate.
impl Transition for Animation {
    fn perform(
        &self,
        backend: &mut dyn Backend,
        view: ViewId,
        phase: TransitionPhase<'_>,
        completion: Completion,
    ) {
        match phase {
            TransitionPhase::Changing { from, to } => {
                backend.animate(view, from, to, *self, completion);
            }
            TransitionPhase::Appearing { .. } | TransitionPhase::Disappearing { .. } => {
                completion.complete();
            }
        }
    }
}

/// Animates views in from (and out to) a hidden state derived from their real attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityTransition {
    /// Alpha multiplier of the hidden state.
    pub alpha: f64,
    /// Applied on top of the view’s transform in the hidden state.
    pub transform: Transform3D,
    pub animation: Animation,
}

impl VisibilityTransition {
    pub fn fade(animation: Animation) -> VisibilityTransition {
        VisibilityTransition {
            alpha: 0.,
            transform: Transform3D::identity(),
            animation,
        }
    }

    pub fn scale_and_fade(scale: f64, animation: Animation) -> VisibilityTransition {
        VisibilityTransition {
            alpha: 0.,
            transform: Transform3D::scale(scale, scale, 1.),
            animation,
        }
    }

    fn hidden(&self, attributes: &LayoutAttributes) -> LayoutAttributes {
        let mut hidden = *attributes;
        hidden.set_alpha(attributes.alpha() * self.alpha);
        hidden.set_transform(self.transform.then(&attributes.transform()));
        hidden
    }
}

impl Transition for VisibilityTransition {
    fn perform(
        &self,
        backend: &mut dyn Backend,
        view: ViewId,
        phase: TransitionPhase<'_>,
        completion: Completion,
    ) {
        match phase {
            TransitionPhase::Appearing { to } => {
                let from = self.hidden(to);
                backend.set_attributes(view, &from);
                backend.animate(view, &from, to, self.animation, completion);
            }
            TransitionPhase::Disappearing { from } => {
                let to = self.hidden(from);
                backend.animate(view, from, &to, self.animation, completion);
            }
            TransitionPhase::Changing { from, to } => {
                backend.animate(view, from, to, self.animation, completion);
            }
        }
    }
}
