//! Error types for stage registration and rollback

use std::fmt::Debug;

use thiserror::Error;

/// Errors from stage registration and lookup.
///
/// All registration errors are synchronous and immediate; execution errors
/// are always resolved through the rollback procedure instead.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A name-requiring operation was invoked without a name
    #[error("a stage name is required")]
    MissingName,
    /// Stage registered without both a forward and a compensating action
    #[error("stage '{name}' must supply both an up and a down action")]
    IncompleteImplementation {
        /// Name the stage was registered under
        name: String,
    },
    /// Stage name collides exactly with an already-registered stage
    #[error("stage '{name}' is already registered")]
    DuplicateStage {
        /// The colliding name
        name: String,
    },
}

/// A compensation action failed while rolling back.
///
/// Identifies the stage whose forward action originally failed; the stage
/// whose compensation actually failed is carried separately for diagnostics.
/// Compensation results collected before the failing one are discarded.
#[derive(Debug, Error)]
#[error("stage '{failed_stage}' failed and its rollback did not complete")]
pub struct RollbackError<E: Debug> {
    /// Name of the stage whose forward action originally failed
    pub failed_stage: String,
    /// Name of the stage whose compensation failed
    pub compensation_stage: String,
    /// The error that triggered the rollback
    pub stage_error: E,
    /// The error raised by the failing compensation
    pub compensation_error: E,
}
