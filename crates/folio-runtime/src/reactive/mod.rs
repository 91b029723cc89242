#![forbid(unsafe_code)]

//! Reactive plumbing: one producer per value, many derived style channels.

pub mod observable;

pub use observable::{Derived, Observable, Subscription};
