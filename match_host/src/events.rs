use std::cell::RefCell;
use std::rc::{Rc, Weak};

use game_core::{MatchResult, Score};

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Registry<T> {
    next_id: u64,
    callbacks: Vec<(u64, Callback<T>)>,
}

/// Observer list for one event type
pub struct Observers<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Observers<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                callbacks: Vec::new(),
            })),
        }
    }

    /// Register `callback`; it stays registered while the handle lives
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        let callback: Callback<T> = Rc::new(RefCell::new(callback));
        registry.callbacks.push((id, callback));

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            remove: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().callbacks.retain(|(cb_id, _)| *cb_id != id);
                }
            })),
        }
    }

    /// Call every subscriber. Subscribing or dropping handles from inside
    /// a callback is allowed and takes effect on the next emit.
    pub fn emit(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = self
            .registry
            .borrow()
            .callbacks
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            if let Ok(mut f) = callback.try_borrow_mut() {
                (&mut *f)(value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by `subscribe`. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    remove: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.run();
    }

    /// Keep the callback registered for as long as the observer list lives
    pub fn forget(mut self) {
        self.remove = None;
    }

    fn run(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

/// Notifications a match host publishes
#[derive(Default)]
pub struct EventBus {
    pub score_changed: Observers<Score>,
    pub match_ended: Observers<MatchResult>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }
}
