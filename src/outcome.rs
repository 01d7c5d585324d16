//! Tagged outcome of a saga execution

use crate::Accumulator;

/// Outcome of [`Saga::execute`](crate::Saga::execute).
///
/// Both variants are successful resolutions of the call: `RolledBack` means a
/// stage failed but every previously-succeeded stage was compensated. Only a
/// failure *during compensation* surfaces as an error.
#[derive(Debug)]
pub enum SagaOutcome<T, C, E> {
    /// Every stage completed
    Completed {
        /// Each stage's forward result, keyed by stage name in execution order
        results: Accumulator<T>,
    },
    /// A stage failed and all prior stages were compensated
    RolledBack {
        /// Name of the stage whose `before`/`up`/`after` failed
        failed_stage: String,
        /// The error that triggered the rollback
        error: E,
        /// Compensation results, most recently succeeded stage first
        compensations: Vec<C>,
    },
}

impl<T, C, E> SagaOutcome<T, C, E> {
    /// Check if every stage completed
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Check if a rollback occurred
    pub fn is_rolled_back(&self) -> bool {
        matches!(self, Self::RolledBack { .. })
    }
}
