#![forbid(unsafe_code)]

//! Shared progress values with change notification.
//!
//! # Design
//!
//! [`Observable<T>`] wraps a value in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). One producer (a scroll driver, a hover driver) sets
//! it once per frame; any number of style channels subscribe and derive their
//! own values from it. When the value changes (by `PartialEq`), live
//! subscribers run in registration order.
//!
//! [`Observable::map`] builds a [`Derived`] value: a second observable kept in
//! sync with the first for as long as the `Derived` is alive.
//!
//! # Failure Modes
//!
//! - **Subscriber leak**: [`Subscription`] guards stored forever keep their
//!   callbacks alive. Dead weak references are pruned lazily during
//!   notification.
//! - **Cycles**: a subscriber that sets the observable it is subscribed to
//!   recurses until the value stops changing.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{info, info_span};
use web_time::Instant;

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: T,
    version: u64,
    /// Dead entries are pruned on notify.
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates a new handle to the **same** state.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each value-changing mutation.
/// 2. `set(v)` where `v == current` is a no-op.
/// 3. Subscribers are notified in registration order.
/// 4. Dropped [`Subscription`] guards are never called again.
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

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable at version 0 with no subscribers.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Set a new value, notifying subscribers if it differs from the current
    /// one.
    ///
    /// Safe to call from within a subscriber of a *different* observable.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Call `callback` with each new value.
    ///
    /// Dropping the returned guard unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Derive a value from this one. The derived observable starts at
    /// `f(current)` and follows every change until the [`Derived`] is dropped.
    pub fn map<U, F>(&self, f: F) -> Derived<U>
    where
        U: Clone + PartialEq + 'static,
        F: Fn(&T) -> U + 'static,
    {
        let value = Observable::new(self.with(&f));
        let sink = value.clone();
        let subscription = self.subscribe(move |v| sink.set(f(v)));
        Derived {
            value,
            _subscription: subscription,
        }
    }

    /// Incremented once per change. Useful for dirty checks.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self) {
        // Collect first so no borrow is held while callbacks run.
        let callbacks: Vec<CallbackRc<T>> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect()
        };

        if callbacks.is_empty() {
            return;
        }

        let channels = callbacks.len() as u64;
        let value = self.get();
        let started = Instant::now();
        let _span = info_span!(
            "observable.propagate",
            channels,
            duration_us = tracing::field::Empty
        )
        .entered();

        for cb in &callbacks {
            cb(&value);
        }

        let duration_us = started.elapsed().as_micros() as u64;
        tracing::Span::current().record("duration_us", duration_us);
        info!(
            propagation_duration_us = duration_us,
            channels, "observable propagation duration"
        );
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping it drops the only strong reference to the callback, so the weak
/// entry in the observable fails to upgrade from then on.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// A value derived from another observable through [`Observable::map`].
pub struct Derived<U> {
    value: Observable<U>,
    _subscription: Subscription,
}

impl<U: Clone + PartialEq + 'static> Derived<U> {
    /// Current derived value.
    #[must_use]
    pub fn get(&self) -> U {
        self.value.get()
    }

    /// The derived observable, for chaining further maps or subscriptions.
    #[must_use]
    pub fn observable(&self) -> &Observable<U> {
        &self.value
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.value.version()
    }
}

impl<U: fmt::Debug> fmt::Debug for Derived<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Derived").field(&self.value).finish()
    }
}
