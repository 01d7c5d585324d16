//! Sequential saga engine: registration, validation, execute/rollback

use std::fmt::Debug;
use std::sync::atomic::Ordering;

use crate::stage::{noop_after, noop_before};
use crate::{
    Accumulator, NoOpObserver, RegistrationError, RollbackError, SagaObserver, SagaOutcome,
    SagaStats, SagaStatsSnapshot, Stage, StageDefinition,
};

/// An ordered list of named stages executed sequentially, with reverse-order
/// compensation when a stage fails.
///
/// `T` is the forward-action result type, `C` the compensation result type,
/// `E` the error type shared by all actions and hooks.
///
/// Each stage's forward action sees the accumulated results of every prior
/// stage and gets exactly one attempt; so do hooks and compensations. There
/// is no cancellation, timeout, or retry mechanism.
///
/// `execute` borrows the engine immutably while `add_stage`/`remove_stage`
/// borrow it mutably, so the stage list cannot change under an in-flight
/// execution.
pub struct Saga<T, C, E> {
    stages: Vec<Stage<T, C, E>>,
    observer: Box<dyn SagaObserver>,
    stats: SagaStats,
}

impl<T, C, E> Debug for Saga<T, C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Saga").field("stages", &self.stages).finish_non_exhaustive()
    }
}

impl<T, C, E> Saga<T, C, E>
where
    T: Send + 'static,
    C: Send + 'static,
    E: Send + 'static,
{
    /// Create an engine with no stages
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            observer: Box::new(NoOpObserver),
            stats: SagaStats::new(),
        }
    }

    /// Create an engine seeded from an ordered sequence of stage definitions.
    ///
    /// Every seeded definition goes through the same validation as
    /// [`add_stage`](Self::add_stage).
    pub fn with_stages<I, N>(stages: I) -> Result<Self, RegistrationError>
    where
        I: IntoIterator<Item = (N, StageDefinition<T, C, E>)>,
        N: Into<String>,
    {
        let mut saga = Self::new();
        for (name, definition) in stages {
            saga.add_stage(name, definition)?;
        }
        Ok(saga)
    }

    /// Replace the default no-op observer
    #[must_use]
    pub fn with_observer(mut self, observer: impl SagaObserver) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Append a stage.
    ///
    /// # Errors
    ///
    /// Returns `MissingName` if `name` is empty, `IncompleteImplementation`
    /// if the definition lacks an `up` or `down` action, and `DuplicateStage`
    /// if `name` exactly matches an existing stage's name. A name differing
    /// only in case is accepted as distinct.
    pub fn add_stage(
        &mut self,
        name: impl Into<String>,
        definition: StageDefinition<T, C, E>,
    ) -> Result<(), RegistrationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistrationError::MissingName);
        }

        let StageDefinition {
            up,
            down,
            before,
            after,
        } = definition;
        let (Some(up), Some(down)) = (up, down) else {
            return Err(RegistrationError::IncompleteImplementation { name });
        };

        if self.stages.iter().any(|stage| stage.name == name) {
            return Err(RegistrationError::DuplicateStage { name });
        }

        self.stages.push(Stage {
            name,
            up,
            down,
            before: before.unwrap_or_else(noop_before),
            after: after.unwrap_or_else(noop_after),
        });
        Ok(())
    }

    /// Remove all stages whose name matches `name` case-insensitively.
    ///
    /// Removal is deliberately looser than the case-sensitive uniqueness
    /// check in [`add_stage`](Self::add_stage). Removing a name with no match
    /// is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `MissingName` if `name` is empty.
    pub fn remove_stage(&mut self, name: &str) -> Result<(), RegistrationError> {
        if name.is_empty() {
            return Err(RegistrationError::MissingName);
        }
        let target = name.to_uppercase();
        self.stages.retain(|stage| stage.name.to_uppercase() != target);
        Ok(())
    }

    /// Get the first stage whose name exactly equals `name`.
    ///
    /// # Errors
    ///
    /// Returns `MissingName` if `name` is empty.
    pub fn get_stage(&self, name: &str) -> Result<Option<&Stage<T, C, E>>, RegistrationError> {
        if name.is_empty() {
            return Err(RegistrationError::MissingName);
        }
        Ok(self.stages.iter().find(|stage| stage.name == name))
    }

    /// Number of registered stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether no stage is registered
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Snapshot of the engine's execution counters
    pub fn stats(&self) -> SagaStatsSnapshot {
        self.stats.snapshot()
    }
}

impl<T, C, E> Default for Saga<T, C, E>
where
    T: Send + 'static,
    C: Send + 'static,
    E: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C, E> Saga<T, C, E>
where
    T: Clone + Send + 'static,
    C: Send + 'static,
    E: Debug + Send + 'static,
{
    /// Run all stages in registration order.
    ///
    /// Each stage's `before`, `up`, and `after` are awaited one at a time; a
    /// stage's result is recorded in the accumulator only once all three
    /// succeed. On any stage failure the engine compensates every
    /// previously-succeeded stage in reverse execution order and resolves
    /// with [`SagaOutcome::RolledBack`] — a rollback is a successful
    /// resolution of the call, distinguished only by the outcome variant.
    ///
    /// # Errors
    ///
    /// Returns [`RollbackError`] only when a compensation itself fails, named
    /// after the originally failed stage. With well-behaved compensations
    /// this call is infallible.
    pub async fn execute(&self) -> Result<SagaOutcome<T, C, E>, RollbackError<E>> {
        let mut results = Accumulator::new();

        for (index, stage) in self.stages.iter().enumerate() {
            self.stats.stages_started.fetch_add(1, Ordering::Relaxed);
            self.observer.on_stage_started(&stage.name);

            match run_stage(stage, &results).await {
                Ok(result) => {
                    results.record(stage.name.clone(), result);
                    self.stats.stages_completed.fetch_add(1, Ordering::Relaxed);
                    self.observer.on_stage_completed(&stage.name);
                }
                Err(error) => {
                    self.stats.stages_failed.fetch_add(1, Ordering::Relaxed);
                    self.observer
                        .on_stage_failed(&stage.name, &format!("{error:?}"));
                    return self.rollback(index, results, error).await;
                }
            }
        }

        self.stats.sagas_completed.fetch_add(1, Ordering::Relaxed);
        self.observer.on_saga_completed();
        Ok(SagaOutcome::Completed { results })
    }

    /// Compensate stages `0..failed_index` in reverse execution order, each
    /// with the result it originally produced. The failed stage itself is
    /// never compensated.
    async fn rollback(
        &self,
        failed_index: usize,
        mut results: Accumulator<T>,
        stage_error: E,
    ) -> Result<SagaOutcome<T, C, E>, RollbackError<E>> {
        let failed_stage = self.stages[failed_index].name.clone();
        self.observer.on_rollback_started(&failed_stage);

        let mut compensations = Vec::with_capacity(failed_index);
        for stage in self.stages[..failed_index].iter().rev() {
            // Every stage before the failed one recorded a result.
            let Some(prior) = results.take(&stage.name) else {
                continue;
            };

            self.stats
                .compensations_started
                .fetch_add(1, Ordering::Relaxed);
            self.observer.on_compensation_started(&stage.name);

            match (stage.down)(prior).await {
                Ok(compensation) => {
                    compensations.push(compensation);
                    self.stats
                        .compensations_completed
                        .fetch_add(1, Ordering::Relaxed);
                    self.observer.on_compensation_completed(&stage.name);
                }
                Err(compensation_error) => {
                    self.stats
                        .compensations_failed
                        .fetch_add(1, Ordering::Relaxed);
                    self.observer
                        .on_compensation_failed(&stage.name, &format!("{compensation_error:?}"));
                    return Err(RollbackError {
                        failed_stage,
                        compensation_stage: stage.name.clone(),
                        stage_error,
                        compensation_error,
                    });
                }
            }
        }

        self.stats.sagas_rolled_back.fetch_add(1, Ordering::Relaxed);
        self.observer.on_saga_rolled_back(&failed_stage);
        Ok(SagaOutcome::RolledBack {
            failed_stage,
            error: stage_error,
            compensations,
        })
    }
}

/// Run one stage: `before`, then `up`, then `after`, each awaited in turn.
/// Hook values are discarded; any failure aborts the stage.
async fn run_stage<T, C, E>(stage: &Stage<T, C, E>, results: &Accumulator<T>) -> Result<T, E>
where
    T: Clone,
{
    (stage.before)(results.clone()).await?;
    let result = (stage.up)(results.clone()).await?;
    (stage.after)(result.clone()).await?;
    Ok(result)
}
