//! Command serialization
//!
//! The session (cursor, store handle, output sink) is shared mutable state
//! with no finer-grained locking. `CommandGate` guarantees that at most one
//! command touches it at a time: a caller holds the gate for the whole
//! command, including every suspension on the store, and later callers wait
//! in arrival order.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, MutexGuard};

/// Dispatcher state as observed from outside the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Executing,
}

pub struct CommandGate<T> {
    inner: Mutex<T>,
    executing: AtomicBool,
}

impl<T> CommandGate<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner: Mutex::new(inner),
            executing: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> GateState {
        if self.executing.load(Ordering::SeqCst) {
            GateState::Executing
        } else {
            GateState::Idle
        }
    }

    /// Wait for the gate and enter the Executing state. The gate returns to
    /// Idle when the guard is dropped, including on unwind.
    pub async fn enter(&self) -> GateGuard<'_, T> {
        let guard = self.inner.lock().await;
        self.executing.store(true, Ordering::SeqCst);
        GateGuard {
            guard,
            executing: &self.executing,
        }
    }
}

/// Exclusive access to the gated value for the duration of one command.
pub struct GateGuard<'a, T> {
    guard: MutexGuard<'a, T>,
    executing: &'a AtomicBool,
}

impl<T> Deref for GateGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for GateGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T> Drop for GateGuard<'_, T> {
    fn drop(&mut self) {
        self.executing.store(false, Ordering::SeqCst);
    }
}
