//! Replayable Value Module
//!
//! Wraps an async producer so it runs at most once and every observer sees
//! the same result.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FutureExt, Shared};

// == Replayable ==
/// A lazily started, memoized async value.
///
/// The wrapped producer is not polled until the first observer awaits a
/// handle. Every clone shares the same computation: the producer runs once
/// and its output is cloned out to all current and later observers.
///
/// A failing producer is expressed through `T` (e.g. `Result<V, E>`); the
/// failure is replayed like any other output.
pub struct Replayable<T: Clone> {
    inner: Shared<BoxFuture<'static, T>>,
}

impl<T: Clone> Replayable<T> {
    // == Constructor ==
    /// Wraps `producer` without polling it.
    pub fn new<F>(producer: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            inner: producer.boxed().shared(),
        }
    }

    /// Returns the output if the producer already completed.
    pub fn peek(&self) -> Option<&T> {
        self.inner.peek()
    }

    /// Returns true once the producer has completed.
    pub fn is_resolved(&self) -> bool {
        self.peek().is_some()
    }

    /// Returns true if both handles observe the same computation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Shared::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone> Clone for Replayable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone> Future for Replayable<T> {
    type Output = T;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        self.inner.poll_unpin(cx)
    }
}

impl<T: Clone> fmt::Debug for Replayable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Replayable")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
