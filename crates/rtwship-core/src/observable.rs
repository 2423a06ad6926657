//! Observer pattern for editable entities.
//!
//! An entity owns an [`Observers`] list and calls [`Observers::notify`] after
//! each completed mutation. Handlers receive the notifying entity and an event
//! value; the event carries its own kind tag through [`Notification::kind`].
//!
//! Delivery is synchronous and follows subscription order. The handler list is
//! snapshotted before each pass, so subscriptions added or removed by a
//! handler only take effect on the next notification.

use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};
use uuid::Uuid;

/// Subscription handle identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Event payload sent to subscribers.
pub trait Notification: fmt::Debug {
    /// Short tag identifying the kind of change.
    fn kind(&self) -> &'static str;
}

type Handler<S, E> = Arc<dyn Fn(&S, &E) + Send + Sync>;
type HandlerList<S, E> = RwLock<Vec<(SubscriptionId, Handler<S, E>)>>;

/// Ordered list of subscribers for a source of type `S` emitting events `E`.
pub struct Observers<S: ?Sized, E> {
    handlers: Arc<HandlerList<S, E>>,
}

impl<S: ?Sized, E> Observers<S, E> {
    /// Create an empty subscriber list
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a handler. It is called after every later notification until
    /// the returned subscription is cancelled.
    pub fn subscribe<F>(&self, handler: F) -> Subscription<S, E>
    where
        F: Fn(&S, &E) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().push((id, Arc::new(handler)));
        tracing::debug!("Subscription {} added", id);
        Subscription {
            id,
            handlers: Arc::downgrade(&self.handlers),
        }
    }

    /// Remove a handler by id.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        remove_handler(&self.handlers, id)
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Drop every subscription.
    pub fn clear(&self) {
        self.handlers.write().clear();
    }
}

impl<S: ?Sized, E: Notification> Observers<S, E> {
    /// Call every current subscriber with `source` and `event`.
    ///
    /// The lock is released before the first handler runs.
    pub fn notify(&self, source: &S, event: &E) {
        let snapshot: Vec<Handler<S, E>> = self
            .handlers
            .read()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        tracing::trace!(
            kind = event.kind(),
            subscribers = snapshot.len(),
            "Delivering notification"
        );
        for handler in snapshot {
            handler(source, event);
        }
    }
}

impl<S: ?Sized, E> Default for Observers<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized, E> fmt::Debug for Observers<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

fn remove_handler<S: ?Sized, E>(handlers: &HandlerList<S, E>, id: SubscriptionId) -> bool {
    let mut handlers = handlers.write();
    let before = handlers.len();
    handlers.retain(|(sub_id, _)| *sub_id != id);
    let removed = handlers.len() != before;
    if removed {
        tracing::debug!("Subscription {} removed", id);
    }
    removed
}

/// Handle returned by [`Observers::subscribe`].
///
/// Dropping the handle keeps the handler registered; call
/// [`Subscription::unsubscribe`] to stop receiving notifications.
pub struct Subscription<S: ?Sized, E> {
    id: SubscriptionId,
    handlers: Weak<HandlerList<S, E>>,
}

impl<S: ?Sized, E> Subscription<S, E> {
    /// Identifier accepted by [`Observers::unsubscribe`].
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Stop receiving notifications.
    ///
    /// Returns false if the handler was already removed or the observed
    /// entity no longer exists.
    pub fn unsubscribe(self) -> bool {
        match self.handlers.upgrade() {
            Some(handlers) => remove_handler(&handlers, self.id),
            None => false,
        }
    }
}

impl<S: ?Sized, E> fmt::Debug for Subscription<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// An entity that exposes its observer list.
pub trait Observable: Sized {
    type Event: Notification;

    fn observers(&self) -> &Observers<Self, Self::Event>;

    fn subscribe<F>(&self, handler: F) -> Subscription<Self, Self::Event>
    where
        F: Fn(&Self, &Self::Event) + Send + Sync + 'static,
    {
        self.observers().subscribe(handler)
    }
}
