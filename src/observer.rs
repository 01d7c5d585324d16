//! Saga observer trait

/// Observer trait for external observability.
///
/// The engine invokes these callbacks at every stage and compensation
/// transition. They never affect control flow or returned values.
pub trait SagaObserver: Send + Sync + 'static {
    fn on_stage_started(&self, stage: &str);
    fn on_stage_completed(&self, stage: &str);
    fn on_stage_failed(&self, stage: &str, error: &str);
    fn on_rollback_started(&self, failed_stage: &str);
    fn on_compensation_started(&self, stage: &str);
    fn on_compensation_completed(&self, stage: &str);
    fn on_compensation_failed(&self, stage: &str, error: &str);
    fn on_saga_completed(&self);
    fn on_saga_rolled_back(&self, failed_stage: &str);
}

/// No-op observer
pub struct NoOpObserver;

impl SagaObserver for NoOpObserver {
    fn on_stage_started(&self, _stage: &str) {}
    fn on_stage_completed(&self, _stage: &str) {}
    fn on_stage_failed(&self, _stage: &str, _error: &str) {}
    fn on_rollback_started(&self, _failed_stage: &str) {}
    fn on_compensation_started(&self, _stage: &str) {}
    fn on_compensation_completed(&self, _stage: &str) {}
    fn on_compensation_failed(&self, _stage: &str, _error: &str) {}
    fn on_saga_completed(&self) {}
    fn on_saga_rolled_back(&self, _failed_stage: &str) {}
}

/// Tracing-based observer
pub struct TracingObserver;

impl SagaObserver for TracingObserver {
    fn on_stage_started(&self, stage: &str) {
        tracing::info!(stage = %stage, "Stage started");
    }

    fn on_stage_completed(&self, stage: &str) {
        tracing::info!(stage = %stage, "Stage completed");
    }

    fn on_stage_failed(&self, stage: &str, error: &str) {
        tracing::warn!(stage = %stage, error = %error, "Stage failed");
    }

    fn on_rollback_started(&self, failed_stage: &str) {
        tracing::warn!(failed_stage = %failed_stage, "Rolling back");
    }

    fn on_compensation_started(&self, stage: &str) {
        tracing::info!(stage = %stage, "Compensation started");
    }

    fn on_compensation_completed(&self, stage: &str) {
        tracing::info!(stage = %stage, "Compensation completed");
    }

    fn on_compensation_failed(&self, stage: &str, error: &str) {
        tracing::error!(stage = %stage, error = %error, "Compensation failed");
    }

    fn on_saga_completed(&self) {
        tracing::info!("Saga completed");
    }

    fn on_saga_rolled_back(&self, failed_stage: &str) {
        tracing::info!(failed_stage = %failed_stage, "Saga rolled back");
    }
}
