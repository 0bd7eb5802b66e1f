//! Subject/observer primitives for listeners that live outside the ECS.
//!
//! Systems talk through Bevy events. Anything else that wants to follow the
//! session (a UI layer, a replay recorder, a test) subscribes here instead
//! and keeps the returned [`Subscription`] for as long as it wants updates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bevy::prelude::*;

type Handler<T> = Box<dyn FnMut(&T) + Send + Sync>;

struct Listener<T> {
    active: Arc<AtomicBool>,
    handler: Handler<T>,
}

/// Cancellation handle returned by [`EventBus::subscribe`].
///
/// Cancelling is idempotent and may happen from inside the handler itself;
/// the handler is not called again after the call that cancelled it.
#[derive(Clone)]
pub struct Subscription {
    active: Arc<AtomicBool>,
}

impl Subscription {
    pub fn cancel(&self) {
        self.active.store(false, Ordering::Release);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Ordered list of handlers for one kind of notification.
pub struct EventBus<T> {
    listeners: Vec<Listener<T>>,
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<T> EventBus<T> {
    /// Register a handler. Handlers run in subscription order.
    pub fn subscribe(&mut self, handler: impl FnMut(&T) + Send + Sync + 'static) -> Subscription {
        let active = Arc::new(AtomicBool::new(true));
        self.listeners.push(Listener {
            active: active.clone(),
            handler: Box::new(handler),
        });
        Subscription { active }
    }

    /// Same as [`Subscription::cancel`]; kept on the bus for symmetry.
    pub fn unsubscribe(&mut self, subscription: &Subscription) {
        subscription.cancel();
    }

    /// Deliver `event` to every live handler.
    pub fn publish(&mut self, event: &T) {
        self.listeners
            .retain(|listener| listener.active.load(Ordering::Acquire));

        for listener in self.listeners.iter_mut() {
            // A handler earlier in this pass may have cancelled a later one.
            if listener.active.load(Ordering::Acquire) {
                (listener.handler)(event);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .iter()
            .filter(|listener| listener.active.load(Ordering::Acquire))
            .count()
    }

    /// Drop every handler, cancelling outstanding subscriptions.
    pub fn clear(&mut self) {
        for listener in &self.listeners {
            listener.active.store(false, Ordering::Release);
        }
        self.listeners.clear();
    }
}

/// A value cell that notifies subscribers when it changes.
pub struct ObservableValue<T> {
    value: T,
    changed: EventBus<T>,
}

impl<T: Default> Default for ObservableValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> ObservableValue<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            changed: EventBus::default(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&T) + Send + Sync + 'static) -> Subscription {
        self.changed.subscribe(handler)
    }
}

impl<T: PartialEq> ObservableValue<T> {
    /// Store `value`, notifying subscribers only if it differs.
    pub fn set(&mut self, value: T) {
        if self.value == value {
            return;
        }
        self.value = value;
        self.changed.publish(&self.value);
    }
}

/// Subscriptions owned by one listener, cancelled together.
///
/// Cancels everything it holds when dropped, so storing one on an entity or
/// in a resource ties the subscriptions to that owner's lifetime.
#[derive(Component, Resource, Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    pub fn push(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn release(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.cancel();
        }
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl FnMut(&u32) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |value: &u32| sink.lock().unwrap().push(*value))
    }

    #[test]
    fn handlers_run_in_subscription_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::<u32>::default();

        for tag in ["first", "second", "third"] {
            let order = order.clone();
            bus.subscribe(move |_| order.lock().unwrap().push(tag));
        }
        bus.publish(&7);

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let (seen, handler) = recorder();
        let mut bus = EventBus::<u32>::default();
        let sub = bus.subscribe(handler);

        bus.publish(&1);
        bus.unsubscribe(&sub);
        bus.unsubscribe(&sub);
        sub.cancel();
        bus.publish(&2);

        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn handler_can_cancel_itself_mid_publish() {
        let calls = Arc::new(Mutex::new(0));
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let (seen, tail) = recorder();
        let mut bus = EventBus::<u32>::default();

        let calls_in = calls.clone();
        let slot_in = slot.clone();
        let sub = bus.subscribe(move |_| {
            *calls_in.lock().unwrap() += 1;
            if let Some(own) = slot_in.lock().unwrap().as_ref() {
                own.cancel();
            }
        });
        *slot.lock().unwrap() = Some(sub);
        bus.subscribe(tail);

        bus.publish(&1);
        bus.publish(&2);

        assert_eq!(*calls.lock().unwrap(), 1);
        // The listener after the cancelled one still sees every event.
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn observable_only_notifies_on_change() {
        let (seen, handler) = recorder();
        let mut cell = ObservableValue::new(0u32);
        cell.subscribe(handler);

        cell.set(0);
        cell.set(3);
        cell.set(3);
        cell.set(4);

        assert_eq!(*seen.lock().unwrap(), vec![3, 4]);
        assert_eq!(*cell.get(), 4);
    }

    #[test]
    fn dropping_a_subscription_set_cancels_everything() {
        let (seen, handler) = recorder();
        let mut bus = EventBus::<u32>::default();
        {
            let mut set = SubscriptionSet::default();
            set.push(bus.subscribe(handler));
            bus.publish(&1);
        }
        bus.publish(&2);

        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }
}
