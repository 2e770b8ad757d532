use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::PointerPhase;

type Listener<E> = RefCell<dyn FnMut(&E)>;

struct Entry<E> {
    id: u64,
    phase: PointerPhase,
    listener: Weak<Listener<E>>,
}

type Registry<E> = RefCell<Vec<Entry<E>>>;

/// Source of pointer events that listeners can subscribe to.
///
/// Listeners are held weakly; each one stays alive only as long as the
/// [`Subscription`] returned when it was added.
pub struct PointerDispatcher<E> {
    registry: Rc<Registry<E>>,
    next_id: Cell<u64>,
}
impl<E> Default for PointerDispatcher<E> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(vec![])),
            next_id: Cell::new(0),
        }
    }
}
impl<E: 'static> fmt::Debug for PointerDispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerDispatcher")
            .field("listener_count", &self.listener_count())
            .finish()
    }
}

impl<E: 'static> PointerDispatcher<E> {
    /// Returns a new dispatcher with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener for one phase of pointer input. The listener is
    /// removed when the returned subscription is dropped.
    #[must_use = "dropping the subscription immediately removes the listener"]
    pub fn subscribe(
        &self,
        phase: PointerPhase,
        listener: impl FnMut(&E) + 'static,
    ) -> Subscription<E> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let listener: Rc<Listener<E>> = Rc::new(RefCell::new(listener));
        self.registry.borrow_mut().push(Entry {
            id,
            phase,
            listener: Rc::downgrade(&listener),
        });
        log::trace!("Subscribed pointer listener {} to {:?}", id, phase);

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
            _listener: listener,
        }
    }

    /// Sends an event to every live listener for `phase`, in subscription
    /// order.
    ///
    /// Listeners may subscribe or unsubscribe during dispatch. A listener
    /// whose subscription is dropped partway through is not called.
    pub fn dispatch(&self, phase: PointerPhase, event: &E) {
        let listeners = self
            .registry
            .borrow()
            .iter()
            .filter(|entry| entry.phase == phase)
            .map(|entry| entry.listener.clone())
            .collect::<Vec<_>>();

        for weak in listeners {
            if let Some(listener) = weak.upgrade() {
                match listener.try_borrow_mut() {
                    Ok(mut f) => (&mut *f)(event),
                    Err(_) => log::warn!("Skipping reentrant {:?} pointer listener", phase),
                }
            }
        }
    }

    /// Returns the number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.registry
            .borrow()
            .iter()
            .filter(|entry| entry.listener.strong_count() > 0)
            .count()
    }
}

/// Handle keeping a pointer listener alive. Dropping it unsubscribes the
/// listener, including during unwinding.
pub struct Subscription<E> {
    id: u64,
    registry: Weak<Registry<E>>,
    _listener: Rc<Listener<E>>,
}
impl<E> fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
impl<E> Drop for Subscription<E> {
    fn drop(&mut self) {
        // The listener itself is dropped right after this, so even if the
        // registry is busy it can never be upgraded again.
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut entries) = registry.try_borrow_mut() {
                entries.retain(|entry| entry.id != self.id);
            }
        }
        log::trace!("Unsubscribed pointer listener {}", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<i32>>>, impl Fn(i32) -> Box<dyn FnMut(&i32)>) {
        let seen = Rc::new(RefCell::new(vec![]));
        let seen2 = seen.clone();
        let make = move |tag: i32| -> Box<dyn FnMut(&i32)> {
            let seen = seen2.clone();
            Box::new(move |e: &i32| seen.borrow_mut().push(tag * 100 + e))
        };
        (seen, make)
    }

    #[test]
    fn test_dispatch_by_phase() {
        let dispatcher: PointerDispatcher<i32> = PointerDispatcher::new();
        let (seen, make) = recorder();
        let _down = dispatcher.subscribe(PointerPhase::Down, make(1));
        let _up = dispatcher.subscribe(PointerPhase::Up, make(2));

        dispatcher.dispatch(PointerPhase::Down, &5);
        dispatcher.dispatch(PointerPhase::Move, &6);
        dispatcher.dispatch(PointerPhase::Up, &7);
        assert_eq!(*seen.borrow(), vec![105, 207]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let dispatcher: PointerDispatcher<i32> = PointerDispatcher::new();
        let (seen, make) = recorder();
        let sub = dispatcher.subscribe(PointerPhase::Move, make(1));
        assert_eq!(dispatcher.listener_count(), 1);
        dispatcher.dispatch(PointerPhase::Move, &1);
        drop(sub);
        assert_eq!(dispatcher.listener_count(), 0);
        dispatcher.dispatch(PointerPhase::Move, &2);
        assert_eq!(*seen.borrow(), vec![101]);
    }

    #[test]
    fn test_unsubscribe_during_dispatch() {
        let dispatcher: PointerDispatcher<i32> = PointerDispatcher::new();
        let (seen, make) = recorder();

        // The first listener drops the second one's subscription.
        let victim: Rc<RefCell<Option<Subscription<i32>>>> = Rc::new(RefCell::new(None));
        let victim2 = victim.clone();
        let _killer = dispatcher.subscribe(PointerPhase::Move, move |_| {
            victim2.borrow_mut().take();
        });
        *victim.borrow_mut() = Some(dispatcher.subscribe(PointerPhase::Move, make(1)));

        dispatcher.dispatch(PointerPhase::Move, &3);
        assert!(seen.borrow().is_empty());
        assert_eq!(dispatcher.listener_count(), 1);
    }

    #[test]
    fn test_unsubscribe_during_unwind() {
        let dispatcher: PointerDispatcher<i32> = PointerDispatcher::new();
        let (_seen, make) = recorder();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _sub = dispatcher.subscribe(PointerPhase::Up, make(1));
            panic!("host teardown failed");
        }));
        assert!(result.is_err());
        assert_eq!(dispatcher.listener_count(), 0);
    }
}
