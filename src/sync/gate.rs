//! Single-flight guard for mutating requests.

use std::sync::atomic::{AtomicBool, Ordering};

/// Admits at most one mutating request at a time.
///
/// A rejected acquisition has no side effect and is not queued: the caller
/// drops its intent.
///
/// # Examples
///
/// ```
/// let gate = RequestGate::new();
/// {
///     let _permit = gate.permit().unwrap();
///     assert!(gate.is_busy());
///     assert!(gate.permit().is_none());
/// }
/// assert!(!gate.is_busy());
/// ```
#[derive(Debug, Default)]
pub struct RequestGate {
    busy: AtomicBool,
}

impl RequestGate {
    pub fn new() -> Self {
        RequestGate::default()
    }

    /// Marks the gate busy and returns `true` if it was idle.
    ///
    /// Returns `false` without side effect if it was already busy.
    pub fn try_acquire(&self) -> bool {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Clears the busy flag unconditionally.
    pub fn release(&self) {
        self.busy.store(false, Ordering::Release);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Scoped form of [`Self::try_acquire`].
    ///
    /// The returned permit releases the gate when dropped, whatever the exit
    /// path (success, failure, early return or unwinding).
    pub fn permit(&self) -> Option<GatePermit<'_>> {
        // Lazy: dropping a permit releases the gate
        self.try_acquire().then(|| GatePermit { gate: self })
    }
}

/// Held while a mutating request is in flight.
#[derive(Debug)]
pub struct GatePermit<'a> {
    gate: &'a RequestGate,
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        self.gate.release();
    }
}
