//! Typed event dispatcher for the run loop
//!
//! Replaces ambient global pub/sub: the loop owns one `EventBus` per event
//! type, components subscribe and hold the returned `Subscription`, and the
//! handler is unregistered when the subscription drops. Single-threaded by
//! construction (the whole game is one cooperative loop).
//!
//! During `publish` the handler list is detached from the registry, so a
//! handler may subscribe, unsubscribe, or publish without hitting a borrow
//! panic; a re-entrant publish simply finds no handlers attached.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Handler<E> = Box<dyn FnMut(&E)>;

struct Registry<E> {
    next_id: u64,
    handlers: Vec<(u64, Handler<E>)>,
    /// Subscriptions dropped while their handler was detached for dispatch
    dead: Vec<u64>,
}

impl<E> Registry<E> {
    fn new() -> Self {
        Self {
            next_id: 1,
            handlers: Vec::new(),
            dead: Vec::new(),
        }
    }
}

/// A typed publish/subscribe channel
pub struct EventBus<E> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new())),
        }
    }

    /// Register a handler; it stays registered for the lifetime of the
    /// returned `Subscription`
    #[must_use = "dropping the subscription unregisters the handler"]
    pub fn subscribe(&self, handler: impl FnMut(&E) + 'static) -> Subscription<E> {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, Box::new(handler)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Invoke every live handler with `event`
    pub fn publish(&self, event: &E) {
        // Detach the handler list so handlers can touch the bus freely
        let mut handlers = std::mem::take(&mut self.registry.borrow_mut().handlers);
        for (_, handler) in handlers.iter_mut() {
            handler(event);
        }

        let mut registry = self.registry.borrow_mut();
        // Handlers whose subscription dropped mid-dispatch stay out;
        // subscriptions added mid-dispatch are already in the registry
        handlers.retain(|(id, _)| !registry.dead.contains(id));
        registry.dead.clear();
        handlers.append(&mut registry.handlers);
        registry.handlers = handlers;
    }

    pub fn handler_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII handle for a registered handler
pub struct Subscription<E> {
    id: u64,
    registry: Weak<RefCell<Registry<E>>>,
}

impl<E> Drop for Subscription<E> {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return; // bus already gone
        };
        let mut registry = registry.borrow_mut();
        let before = registry.handlers.len();
        registry.handlers.retain(|(id, _)| *id != self.id);
        if registry.handlers.len() == before {
            // Currently detached for dispatch; flag for removal on re-attach
            registry.dead.push(self.id);
        }
    }
}
