//! Test fixtures: a recording backend and a few simple elements.

use crate::attributes::LayoutAttributes;
use crate::backend::Backend;
use crate::constraint::SizeConstraint;
use crate::element::{Element, LayoutChild, ViewDescriptionContext};
use crate::environment::{Environment, EnvironmentKey};
use crate::rect::{Rect, Size};
use crate::transition::{Animation, Completion};
use crate::view::{ViewDescription, ViewId, ViewKind};
use cgmath::{Point2, Vector2};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Build(ViewId, ViewKind),
    Apply(ViewId),
    Insert {
        superview: ViewId,
        subview: ViewId,
        index: usize,
    },
    SetAttributes(ViewId, LayoutAttributes),
    /// Records the target attributes.
    Animate(ViewId, LayoutAttributes),
    Remove(ViewId),
}

/// Records every call and keeps a model of the view hierarchy.
#[derive(Default)]
pub(crate) struct MockBackend {
    ops: Vec<Op>,
    live: HashSet<ViewId>,
    subviews: HashMap<ViewId, Vec<ViewId>>,
    superviews: HashMap<ViewId, ViewId>,
    hold_animations: bool,
    pending: Vec<Completion>,
    on_apply: Option<Box<dyn FnMut(ViewId)>>,
}

impl MockBackend {
    pub(crate) fn new() -> MockBackend {
        MockBackend::default()
    }

    /// Animations don't complete until [`MockBackend::finish_animations`] is called.
    pub(crate) fn holding_animations() -> MockBackend {
        MockBackend {
            hold_animations: true,
            ..MockBackend::default()
        }
    }

    pub(crate) fn set_on_apply<F: FnMut(ViewId) + 'static>(&mut self, f: F) {
        self.on_apply = Some(Box::new(f));
    }

    pub(crate) fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub(crate) fn clear_ops(&mut self) {
        self.ops.clear();
    }

    pub(crate) fn count(&self, f: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| f(op)).count()
    }

    pub(crate) fn builds(&self) -> usize {
        self.count(|op| matches!(op, Op::Build(..)))
    }

    pub(crate) fn removes(&self) -> usize {
        self.count(|op| matches!(op, Op::Remove(..)))
    }

    pub(crate) fn is_live(&self, view: ViewId) -> bool {
        self.live.contains(&view)
    }

    pub(crate) fn live_count(&self) -> usize {
        self.live.len()
    }

    pub(crate) fn subviews(&self, view: ViewId) -> &[ViewId] {
        self.subviews
            .get(&view)
            .map_or(&[][..], |subviews| &subviews[..])
    }

    pub(crate) fn finish_animations(&mut self) {
        for completion in self.pending.drain(..) {
            completion.complete();
        }
    }

    fn detach(&mut self, view: ViewId) {
        if let Some(superview) = self.superviews.remove(&view) {
            if let Some(siblings) = self.subviews.get_mut(&superview) {
                siblings.retain(|sibling| *sibling != view);
            }
        }
    }

    fn release(&mut self, view: ViewId) {
        self.live.remove(&view);
        self.superviews.remove(&view);
        for subview in self.subviews.remove(&view).unwrap_or_default() {
            self.release(subview);
        }
    }
}

impl fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MockBackend")
            .field("ops", &self.ops)
            .field("live", &self.live.len())
            .finish()
    }
}

impl Backend for MockBackend {
    fn build(&mut self, view: ViewId, description: &ViewDescription) {
        assert!(self.live.insert(view), "view {} built twice", view);
        self.subviews.insert(view, Vec::new());
        self.ops.push(Op::Build(view, description.kind()));
    }

    fn apply(&mut self, view: ViewId, _: &ViewDescription) {
        assert!(self.is_live(view), "applied to dead view {}", view);
        self.ops.push(Op::Apply(view));
        if let Some(on_apply) = &mut self.on_apply {
            on_apply(view);
        }
    }

    fn insert_subview(&mut self, superview: ViewId, subview: ViewId, index: usize) {
        self.detach(subview);
        let siblings = self.subviews.entry(superview).or_default();
        let index = index.min(siblings.len());
        siblings.insert(index, subview);
        self.superviews.insert(subview, superview);
        self.ops.push(Op::Insert {
            superview,
            subview,
            index,
        });
    }

    fn set_attributes(&mut self, view: ViewId, attributes: &LayoutAttributes) {
        self.ops.push(Op::SetAttributes(view, *attributes));
    }

    fn animate(
        &mut self,
        view: ViewId,
        _: &LayoutAttributes,
        to: &LayoutAttributes,
        _: Animation,
        completion: Completion,
    ) {
        self.ops.push(Op::Animate(view, *to));
        if self.hold_animations {
            self.pending.push(completion);
        } else {
            completion.complete();
        }
    }

    fn remove(&mut self, view: ViewId) {
        self.detach(view);
        self.release(view);
        self.ops.push(Op::Remove(view));
    }
}

/// Properties of a [`Leaf`] or [`Panel`] view.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BoxView {
    pub name: &'static str,
}

/// Properties of a view of another kind, for kind changes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LabelView {
    pub name: &'static str,
}

/// A fixed-size element backed by a view.
#[derive(Debug, Clone)]
pub(crate) struct Leaf {
    pub name: &'static str,
    pub size: Size,
    pub label: bool,
    pub description: Option<fn(ViewDescription) -> ViewDescription>,
}

impl Leaf {
    pub(crate) fn new(name: &'static str, width: f64, height: f64) -> Leaf {
        Leaf {
            name,
            size: Vector2::new(width, height),
            label: false,
            description: None,
        }
    }

    /// Backs this leaf with a [`LabelView`] instead.
    pub(crate) fn label(mut self) -> Leaf {
        self.label = true;
        self
    }

    /// Adjusts the view description, e.g. to add transitions.
    pub(crate) fn describe(mut self, f: fn(ViewDescription) -> ViewDescription) -> Leaf {
        self.description = Some(f);
        self
    }
}

impl Element for Leaf {
    fn measure(&self, constraint: SizeConstraint, _: &Environment) -> Size {
        constraint.clamp(self.size)
    }

    fn view_description(&self, _: &ViewDescriptionContext<'_>) -> Option<ViewDescription> {
        let description = if self.label {
            ViewDescription::new(LabelView { name: self.name })
        } else {
            ViewDescription::new(BoxView { name: self.name })
        };
        Some(match self.description {
            Some(f) => f(description),
            None => description,
        })
    }
}

/// Stacks its children vertically. Has no view.
#[derive(Debug, Default)]
pub(crate) struct Column {
    children: Vec<(Option<u64>, Arc<dyn Element>)>,
}

impl Column {
    pub(crate) fn new() -> Column {
        Column::default()
    }

    pub(crate) fn child<E: Element>(mut self, element: E) -> Column {
        self.children.push((None, Arc::new(element)));
        self
    }

    pub(crate) fn keyed<E: Element>(mut self, key: u64, element: E) -> Column {
        self.children.push((Some(key), Arc::new(element)));
        self
    }
}

impl Element for Column {
    fn measure(&self, constraint: SizeConstraint, environment: &Environment) -> Size {
        let child_constraint = SizeConstraint {
            width: constraint.width,
            height: crate::constraint::Axis::Unconstrained,
        };
        let size = self
            .children
            .iter()
            .map(|(_, child)| child.measure(child_constraint, environment))
            .fold(Vector2::new(0., 0.), |acc: Size, size| {
                Vector2::new(acc.x.max(size.x), acc.y + size.y)
            });
        constraint.clamp(size)
    }

    fn layout(&self, size: Size, environment: &Environment) -> Vec<LayoutChild> {
        let child_constraint = SizeConstraint::width(size.x);
        let mut y = 0.;
        self.children
            .iter()
            .map(|(key, child)| {
                let child_size = child.measure(child_constraint, environment);
                let frame = Rect::new(Point2::new(0., y), child_size);
                y += child_size.y;
                let laid_out = LayoutChild::new(
                    Arc::clone(child),
                    LayoutAttributes::new(frame),
                    environment,
                );
                match key {
                    Some(key) => laid_out.keyed(*key),
                    None => laid_out,
                }
            })
            .collect()
    }
}

/// A view-backed container with one inset child.
#[derive(Debug)]
pub(crate) struct Panel {
    name: &'static str,
    inset: f64,
    child: Arc<dyn Element>,
}

impl Panel {
    pub(crate) fn new<E: Element>(name: &'static str, inset: f64, child: E) -> Panel {
        Panel {
            name,
            inset,
            child: Arc::new(child),
        }
    }
}

impl Element for Panel {
    fn measure(&self, constraint: SizeConstraint, environment: &Environment) -> Size {
        let inner = self.child.measure(
            constraint.inset(self.inset * 2., self.inset * 2.),
            environment,
        );
        constraint.clamp(inner + Vector2::new(self.inset * 2., self.inset * 2.))
    }

    fn layout(&self, size: Size, environment: &Environment) -> Vec<LayoutChild> {
        let inner = Vector2::new(
            (size.x - self.inset * 2.).max(0.),
            (size.y - self.inset * 2.).max(0.),
        );
        let frame = Rect::new(Point2::new(self.inset, self.inset), inner);
        vec![LayoutChild::new(
            Arc::clone(&self.child),
            LayoutAttributes::new(frame),
            environment,
        )]
    }

    fn view_description(&self, _: &ViewDescriptionContext<'_>) -> Option<ViewDescription> {
        Some(ViewDescription::new(BoxView { name: self.name }))
    }
}

pub(crate) struct MarkerKey;

impl EnvironmentKey for MarkerKey {
    type Value = String;
    fn default_value() -> String {
        "default".into()
    }
}

pub(crate) type ReadLog = Arc<Mutex<Vec<(&'static str, String)>>>;

/// Records the [`MarkerKey`] value it is measured and laid out with.
#[derive(Debug)]
pub(crate) struct EnvironmentRecorder {
    name: &'static str,
    log: ReadLog,
}

impl EnvironmentRecorder {
    pub(crate) fn log() -> ReadLog {
        Arc::default()
    }

    pub(crate) fn new(name: &'static str, log: &ReadLog) -> EnvironmentRecorder {
        EnvironmentRecorder {
            name,
            log: Arc::clone(log),
        }
    }
}

impl Element for EnvironmentRecorder {
    fn measure(&self, _: SizeConstraint, environment: &Environment) -> Size {
        self.log
            .lock()
            .push((self.name, environment.value::<MarkerKey>()));
        Vector2::new(10., 10.)
    }

    fn layout(&self, _: Size, environment: &Environment) -> Vec<LayoutChild> {
        self.log
            .lock()
            .push((self.name, environment.value::<MarkerKey>()));
        Vec::new()
    }
}
