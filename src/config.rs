//! Process-wide render configuration shared by hosts.

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use uuid::Uuid;

/// Debug switches read by every host at the start of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugOptions {
    /// Skips appearing, disappearing and layout transitions.
    pub disable_transitions: bool,
    /// Logs every reconcile report at `info` level.
    pub log_reconcile_reports: bool,
}

/// Identifies a subscription to a [`RenderConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

/// Receives the new options whenever a [`RenderConfig`] changes.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: Receiver<DebugOptions>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Drains pending notifications and returns the latest options, if any arrived.
    pub fn latest(&self) -> Option<DebugOptions> {
        let mut latest = None;
        loop {
            match self.receiver.try_recv() {
                Ok(options) => latest = Some(options),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        latest
    }
}

/// Debug options shared by all hosts of an application.
///
/// Create one, wrap it in an `Arc` and hand it to each host. Hosts subscribe on creation and
/// schedule a pass when the options change.
#[derive(Debug, Default)]
pub struct RenderConfig {
    options: RwLock<DebugOptions>,
    subscribers: Mutex<HashMap<SubscriptionId, Sender<DebugOptions>>>,
}

impl RenderConfig {
    pub fn new(options: DebugOptions) -> RenderConfig {
        RenderConfig {
            options: RwLock::new(options),
            subscribers: Mutex::default(),
        }
    }

    pub fn options(&self) -> DebugOptions {
        *self.options.read()
    }

    /// Modifies the options and notifies subscribers if anything changed.
    pub fn update<F: FnOnce(&mut DebugOptions)>(&self, f: F) {
        let (before, after) = {
            let mut options = self.options.write();
            let before = *options;
            f(&mut options);
            (before, *options)
        };
        if before != after {
            self.notify(after);
        }
    }

    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = channel::unbounded();
        let id = SubscriptionId(Uuid::new_v4());
        self.subscribers.lock().insert(id, sender);
        Subscription { id, receiver }
    }

    /// Returns true if the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.lock().remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    fn notify(&self, options: DebugOptions) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|id, sender| {
            let delivered = sender.send(options).is_ok();
            if !delivered {
                tracing::debug!(?id, "dropping disconnected config subscriber");
            }
            delivered
        });
    }
}
