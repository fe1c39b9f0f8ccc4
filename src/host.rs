use crate::attributes::LayoutAttributes;
use crate::backend::Backend;
use crate::config::{RenderConfig, Subscription};
use crate::constraint::SizeConstraint;
use crate::content::ContentNode;
use crate::controller::{release_dying, Controller, DyingViews, ReconcileReport, Reconciler};
use crate::element::Element;
use crate::environment::Environment;
use crate::error::{GeometryError, RenderError};
use crate::layout::LayoutResultNode;
use crate::path::ElementPath;
use crate::rect::{Rect, Size};
use crate::view::{PassthroughView, ViewDescription, ViewId};
use cgmath::Vector2;
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::sync::Arc;

/// Whether a host is in the middle of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    Idle,
    InProgress,
}

/// The result of [`Host::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome {
    /// Nothing changed since the last pass.
    Skipped,
    Completed(ReconcileReport),
}

impl PassOutcome {
    pub fn report(&self) -> Option<&ReconcileReport> {
        match self {
            PassOutcome::Skipped => None,
            PassOutcome::Completed(report) => Some(report),
        }
    }
}

/// Everything a pass is computed from.
struct Inputs {
    element: Option<Arc<dyn Element>>,
    bounds: Rect,
    environment: Environment,
    needs_update: bool,
    /// Measurements of the root element, keyed by constraint.
    measurements: HashMap<[u64; 4], Size>,
}

impl Inputs {
    fn invalidate(&mut self) {
        self.needs_update = true;
        self.measurements.clear();
    }
}

/// The retained side: controllers and the backend they drive.
struct Tree<B> {
    backend: B,
    root: Controller,
    teardown_send: Sender<ViewId>,
    teardown_recv: Receiver<ViewId>,
    dying: DyingViews,
    passes: u64,
}

impl<B: Backend> Tree<B> {
    fn reconcile(
        &mut self,
        content: &ContentNode,
        transitions_enabled: bool,
    ) -> Result<ReconcileReport, RenderError> {
        let Tree {
            backend,
            root,
            teardown_send,
            dying,
            ..
        } = self;

        root.set_attributes(content.attributes, &mut *backend);
        let mut reconciler = Reconciler {
            backend: &mut *backend,
            teardown: teardown_send,
            dying,
            report: ReconcileReport::default(),
        };
        root.update(
            &ElementPath::empty(),
            content,
            transitions_enabled,
            &mut reconciler,
        )?;
        Ok(reconciler.report)
    }

    /// Removes disappearing views whose transitions have completed.
    fn drain_teardowns(&mut self) -> usize {
        let mut count = 0;
        loop {
            match self.teardown_recv.try_recv() {
                Ok(view) => {
                    if self.dying.contains_key(&view) {
                        tracing::trace!(%view, "disappearing view torn down");
                        self.backend.remove(view);
                        release_dying(&mut self.dying, view);
                        count += 1;
                    } else {
                        // released along with its superview
                        tracing::trace!(%view, "teardown for a view that was already released");
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        count
    }
}

/// Resets the pass state when a pass ends, however it ends.
struct PassGuard<'a> {
    state: &'a Cell<PassState>,
}

impl<'a> Drop for PassGuard<'a> {
    fn drop(&mut self) {
        self.state.set(PassState::Idle);
    }
}

fn same_element(a: &Arc<dyn Element>, b: &Arc<dyn Element>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

fn root_description() -> ViewDescription {
    ViewDescription::new(PassthroughView)
}

/// Lays out and resolves the root element into the content of the root view.
fn root_content(
    element: Option<&Arc<dyn Element>>,
    bounds: Rect,
    environment: &Environment,
) -> ContentNode {
    let children = match element {
        Some(element) => {
            LayoutResultNode::layout(element, Rect::from_size(bounds.size), environment).resolve()
        }
        None => Vec::new(),
    };
    ContentNode {
        description: root_description(),
        attributes: LayoutAttributes::new(bounds),
        children,
    }
}

/// Connects an element tree to a native view hierarchy.
///
/// The host owns a root view and keeps it in sync with its root element. Changing the element,
/// the bounds or the environment marks the host as needing an update; the next call to
/// [`Host::update`] runs one complete pass (layout, resolution, reconciliation) and later calls do
/// nothing until something changes again.
///
/// Hosts are single-threaded. Starting a pass while one is running (e.g. from a backend callback)
/// fails with [`RenderError::Reentrant`].
pub struct Host<B: Backend> {
    state: Cell<PassState>,
    inputs: RefCell<Inputs>,
    tree: RefCell<Tree<B>>,
    root_view: ViewId,
    config: Arc<RenderConfig>,
    subscription: Subscription,
}

impl<B: Backend> Host<B> {
    /// Creates a new Host.
    ///
    /// The root view is built right away, but nothing is rendered until you call `update`.
    pub fn new(mut backend: B, config: Arc<RenderConfig>) -> Host<B> {
        let root_node = root_content(None, Rect::zero(), &Environment::empty());
        let root = Controller::build(&root_node, &mut backend);
        backend.set_attributes(root.view(), &root.attributes());
        let root_view = root.view();
        let (teardown_send, teardown_recv) = channel::unbounded();
        let subscription = config.subscribe();

        Host {
            state: Cell::new(PassState::Idle),
            inputs: RefCell::new(Inputs {
                element: None,
                bounds: Rect::zero(),
                environment: Environment::empty(),
                needs_update: true,
                measurements: HashMap::new(),
            }),
            tree: RefCell::new(Tree {
                backend,
                root,
                teardown_send,
                teardown_recv,
                dying: DyingViews::new(),
                passes: 0,
            }),
            root_view,
            config,
            subscription,
        }
    }

    pub fn set_element(&self, element: Arc<dyn Element>) {
        let mut inputs = self.inputs.borrow_mut();
        let unchanged = inputs
            .element
            .as_ref()
            .map_or(false, |current| same_element(current, &element));
        if !unchanged {
            inputs.element = Some(element);
            inputs.invalidate();
        }
    }

    /// Removes the root element; the next pass empties the root view.
    pub fn clear_element(&self) {
        let mut inputs = self.inputs.borrow_mut();
        if inputs.element.take().is_some() {
            inputs.invalidate();
        }
    }

    pub fn element(&self) -> Option<Arc<dyn Element>> {
        self.inputs.borrow().element.clone()
    }

    /// Sets the frame of the root view in its superview.
    pub fn set_bounds(&self, bounds: Rect) {
        let mut inputs = self.inputs.borrow_mut();
        if inputs.bounds != bounds {
            inputs.bounds = bounds;
            inputs.needs_update = true;
        }
    }

    pub fn bounds(&self) -> Rect {
        self.inputs.borrow().bounds
    }

    /// Sets the environment the root element is laid out in.
    pub fn set_environment(&self, environment: Environment) {
        let mut inputs = self.inputs.borrow_mut();
        if !inputs.environment.shares_storage(&environment) {
            inputs.environment = environment;
            inputs.invalidate();
        }
    }

    pub fn environment(&self) -> Environment {
        self.inputs.borrow().environment.clone()
    }

    /// Measures the root element. Results are cached until the element or environment changes.
    ///
    /// Returns a zero size if there is no element, and an error if the element measured a
    /// non-finite size. Errors are not cached.
    pub fn size_that_fits(&self, constraint: SizeConstraint) -> Result<Size, GeometryError> {
        let key = constraint.key();
        let (element, environment) = {
            let inputs = self.inputs.borrow();
            if let Some(size) = inputs.measurements.get(&key) {
                return Ok(*size);
            }
            match &inputs.element {
                Some(element) => (Arc::clone(element), inputs.environment.clone()),
                None => return Ok(Vector2::new(0., 0.)),
            }
        };

        let size = element.measure(constraint, &environment);
        if !(size.x.is_finite() && size.y.is_finite()) {
            let err = GeometryError::NonFinite {
                field: "measured size",
            };
            tracing::error!(%err, ?element, ?size, "measurement rejected");
            return Err(err);
        }
        self.inputs.borrow_mut().measurements.insert(key, size);
        Ok(size)
    }

    /// The root element’s natural size.
    pub fn intrinsic_size(&self) -> Result<Size, GeometryError> {
        self.size_that_fits(SizeConstraint::UNCONSTRAINED)
    }

    /// Returns true if the next `update` would run a pass.
    pub fn needs_update(&self) -> bool {
        self.absorb_config_changes();
        self.inputs.borrow().needs_update
    }

    pub fn pass_state(&self) -> PassState {
        self.state.get()
    }

    /// Runs a pass if anything changed since the last completed one.
    ///
    /// Completed disappearing transitions are torn down before and after the pass. A failed pass
    /// leaves the host dirty, so the next call runs (and most likely fails) again.
    pub fn update(&self) -> Result<PassOutcome, RenderError> {
        let _pass = self.begin_pass()?;
        self.absorb_config_changes();
        let mut tree = self.tree.borrow_mut();
        tree.drain_teardowns();

        let (element, bounds, environment) = {
            let mut inputs = self.inputs.borrow_mut();
            if !inputs.needs_update {
                tracing::debug!("skipping render pass; nothing changed");
                return Ok(PassOutcome::Skipped);
            }
            inputs.needs_update = false;
            (
                inputs.element.clone(),
                inputs.bounds,
                inputs.environment.clone(),
            )
        };

        let options = self.config.options();
        // the first pass builds everything in place
        let transitions_enabled = tree.passes > 0 && !options.disable_transitions;

        let content = root_content(element.as_ref(), bounds, &environment);
        let result = content
            .validate()
            .and_then(|()| tree.reconcile(&content, transitions_enabled));
        let report = match result {
            Ok(report) => report,
            Err(err) => {
                tracing::error!(%err, "render pass aborted");
                self.inputs.borrow_mut().needs_update = true;
                return Err(err);
            }
        };

        tree.passes += 1;
        tree.drain_teardowns();
        tracing::debug!(
            pass = tree.passes,
            created = report.created.len(),
            updated = report.updated.len(),
            removed = report.removed.len(),
            "render pass completed"
        );
        if options.log_reconcile_reports {
            tracing::info!(?report, "reconcile report");
        }
        Ok(PassOutcome::Completed(report))
    }

    /// Runs a pass even if nothing changed.
    pub fn force_update(&self) -> Result<PassOutcome, RenderError> {
        if self.state.get() == PassState::InProgress {
            tracing::error!("rejected a reentrant render pass");
            return Err(RenderError::Reentrant);
        }
        self.inputs.borrow_mut().needs_update = true;
        self.update()
    }

    /// Receives configuration changes and tears down views whose disappearing transitions have
    /// completed. Returns the number of views torn down.
    pub fn poll(&self) -> Result<usize, RenderError> {
        let _pass = self.begin_pass()?;
        self.absorb_config_changes();
        let count = self.tree.borrow_mut().drain_teardowns();
        Ok(count)
    }

    /// Full element paths of all live controllers, depth-first.
    pub fn controller_paths(&self) -> Result<Vec<ElementPath>, RenderError> {
        self.inspect(|tree| {
            let mut paths = Vec::new();
            tree.root.collect_paths(&ElementPath::empty(), &mut paths);
            paths
        })
    }

    /// The live view at a full element path.
    pub fn view_at(&self, path: &ElementPath) -> Result<Option<ViewId>, RenderError> {
        self.inspect(|tree| tree.root.view_at(path))
    }

    /// Number of views still playing their disappearing transition.
    pub fn dying_views(&self) -> Result<usize, RenderError> {
        self.inspect(|tree| tree.dying.len())
    }

    pub fn root_view(&self) -> ViewId {
        self.root_view
    }

    pub fn config(&self) -> &Arc<RenderConfig> {
        &self.config
    }

    /// # Panics
    /// - if called during a pass
    pub fn backend(&self) -> Ref<B> {
        Ref::map(self.tree.borrow(), |tree| &tree.backend)
    }

    /// # Panics
    /// - if called during a pass
    pub fn backend_mut(&self) -> RefMut<B> {
        RefMut::map(self.tree.borrow_mut(), |tree| &mut tree.backend)
    }

    fn begin_pass(&self) -> Result<PassGuard, RenderError> {
        if self.state.get() == PassState::InProgress {
            tracing::error!("rejected a reentrant render pass");
            return Err(RenderError::Reentrant);
        }
        self.state.set(PassState::InProgress);
        Ok(PassGuard { state: &self.state })
    }

    fn inspect<R, F: FnOnce(&Tree<B>) -> R>(&self, f: F) -> Result<R, RenderError> {
        if self.state.get() == PassState::InProgress {
            return Err(RenderError::Reentrant);
        }
        Ok(f(&self.tree.borrow()))
    }

    fn absorb_config_changes(&self) {
        if self.subscription.latest().is_some() {
            self.inputs.borrow_mut().needs_update = true;
        }
    }
}

impl<B: Backend> Drop for Host<B> {
    fn drop(&mut self) {
        self.config.unsubscribe(self.subscription.id());
    }
}
