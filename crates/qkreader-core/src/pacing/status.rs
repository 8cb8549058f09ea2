//! Pacer status shared between the pacing loop and the rest of the app.

use core::sync::atomic::{AtomicU8, AtomicU32, AtomicU64, Ordering};

use super::PacerState;

/// Immutable pacer snapshot for UI and logs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PacerSnapshot {
    pub state: PacerState,
    pub current_wpm: f64,
    pub interval_ms: f64,
    pub words_delivered: u64,
    pub revision: u32,
}

/// Lock-free shared pacer status.
///
/// Only the task that owns the pacer publishes; any number of readers may
/// take snapshots concurrently.
#[derive(Debug)]
pub struct PacerStatusHandle {
    state: AtomicU8,
    current_wpm_bits: AtomicU64,
    interval_ms_bits: AtomicU64,
    words_delivered: AtomicU64,
    revision: AtomicU32,
}

impl Default for PacerStatusHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl PacerStatusHandle {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(PacerState::Stopped as u8),
            current_wpm_bits: AtomicU64::new(0),
            interval_ms_bits: AtomicU64::new(0),
            words_delivered: AtomicU64::new(0),
            revision: AtomicU32::new(0),
        }
    }

    pub fn snapshot(&self) -> PacerSnapshot {
        PacerSnapshot {
            state: PacerState::from_raw(self.state.load(Ordering::Acquire)),
            current_wpm: f64::from_bits(self.current_wpm_bits.load(Ordering::Acquire)),
            interval_ms: f64::from_bits(self.interval_ms_bits.load(Ordering::Acquire)),
            words_delivered: self.words_delivered.load(Ordering::Acquire),
            revision: self.revision.load(Ordering::Acquire),
        }
    }

    pub fn current_wpm(&self) -> f64 {
        f64::from_bits(self.current_wpm_bits.load(Ordering::Acquire))
    }

    /// Stores `snapshot` (its `revision` is ignored) and bumps the revision
    /// when anything changed. Returns whether it did.
    pub fn publish(&self, snapshot: PacerSnapshot) -> bool {
        let mut changed = false;
        changed |= swap_changed_u8(&self.state, snapshot.state as u8);
        changed |= swap_changed_u64(&self.current_wpm_bits, snapshot.current_wpm.to_bits());
        changed |= swap_changed_u64(&self.interval_ms_bits, snapshot.interval_ms.to_bits());
        changed |= swap_changed_u64(&self.words_delivered, snapshot.words_delivered);
        if changed {
            self.revision.fetch_add(1, Ordering::AcqRel);
        }
        changed
    }
}

fn swap_changed_u8(slot: &AtomicU8, value: u8) -> bool {
    slot.swap(value, Ordering::AcqRel) != value
}

fn swap_changed_u64(slot: &AtomicU64, value: u64) -> bool {
    slot.swap(value, Ordering::AcqRel) != value
}
