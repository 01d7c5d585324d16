//! Engine statistics

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-engine execution counters
pub struct SagaStats {
    pub stages_started: AtomicU64,
    pub stages_completed: AtomicU64,
    pub stages_failed: AtomicU64,
    pub compensations_started: AtomicU64,
    pub compensations_completed: AtomicU64,
    pub compensations_failed: AtomicU64,
    pub sagas_completed: AtomicU64,
    pub sagas_rolled_back: AtomicU64,
}

impl SagaStats {
    pub fn new() -> Self {
        Self {
            stages_started: AtomicU64::new(0),
            stages_completed: AtomicU64::new(0),
            stages_failed: AtomicU64::new(0),
            compensations_started: AtomicU64::new(0),
            compensations_completed: AtomicU64::new(0),
            compensations_failed: AtomicU64::new(0),
            sagas_completed: AtomicU64::new(0),
            sagas_rolled_back: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> SagaStatsSnapshot {
        SagaStatsSnapshot {
            stages_started: self.stages_started.load(Ordering::Relaxed),
            stages_completed: self.stages_completed.load(Ordering::Relaxed),
            stages_failed: self.stages_failed.load(Ordering::Relaxed),
            compensations_started: self.compensations_started.load(Ordering::Relaxed),
            compensations_completed: self.compensations_completed.load(Ordering::Relaxed),
            compensations_failed: self.compensations_failed.load(Ordering::Relaxed),
            sagas_completed: self.sagas_completed.load(Ordering::Relaxed),
            sagas_rolled_back: self.sagas_rolled_back.load(Ordering::Relaxed),
        }
    }
}

impl Default for SagaStats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct SagaStatsSnapshot {
    pub stages_started: u64,
    pub stages_completed: u64,
    pub stages_failed: u64,
    pub compensations_started: u64,
    pub compensations_completed: u64,
    pub compensations_failed: u64,
    pub sagas_completed: u64,
    pub sagas_rolled_back: u64,
}
