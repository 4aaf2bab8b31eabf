//! Single-slot value with synchronous change notification.
//!
//! [`Observable<T>`] keeps its value in shared `Rc<RefCell<..>>` storage so
//! several handles (the session, UI wiring, watchers) see the same slot.
//! Every [`Observable::set`] replaces the value and then calls each watcher
//! once, in registration order, on the caller's stack. There is no equality
//! check, coalescing or deferred dispatch.
//!
//! The borrow on the slot is released before watchers run, so a watcher may
//! read any observable (including the one that fired). A watcher that calls
//! `set` on the observable that is notifying it recurses; nothing in this
//! crate does that.

use std::cell::RefCell;
use std::rc::Rc;

type Watcher<T> = Rc<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: T,
    version: u64,
    watchers: Vec<Watcher<T>>,
}

/// A shared value that notifies watchers whenever it is replaced.
///
/// Cloning an `Observable` creates a new handle to the same slot.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("watchers", &inner.watchers.len())
            .finish()
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                watchers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value, then notify every watcher with the new value.
    pub fn set(&self, value: T) {
        let (snapshot, watchers) = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.version += 1;
            (inner.value.clone(), inner.watchers.clone())
        };
        for watcher in &watchers {
            watcher(&snapshot);
        }
    }

    /// Register a watcher. Watchers live as long as the observable.
    pub fn add_watcher(&self, watcher: impl Fn(&T) + 'static) {
        self.inner.borrow_mut().watchers.push(Rc::new(watcher));
    }

    /// Number of `set` calls so far.
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    pub fn watcher_count(&self) -> usize {
        self.inner.borrow().watchers.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reactive/observable.rs"]
mod tests;
