//! Orchestrated SAGA Engine
//!
//! A sequential saga executor for in-process coordination of multi-step
//! operations that cannot be wrapped in a single atomic transaction. Stages
//! run one at a time in registration order, each seeing the accumulated
//! results of every prior stage; if a stage fails, the engine invokes the
//! compensating action of every previously-succeeded stage in reverse order.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! let mut saga: Saga<String, String, String> = Saga::new();
//!
//! saga.add_stage(
//!     "reserve",
//!     StageDefinition::new()
//!         .up(|_results| async { reserve_inventory().await })
//!         .down(|reservation| async move { release(reservation).await }),
//! )?;
//!
//! match saga.execute().await? {
//!     SagaOutcome::Completed { results } => { /* all stages ran */ }
//!     SagaOutcome::RolledBack { compensations, .. } => { /* compensated */ }
//! }
//! ```
//!
//! Single logical thread of control: the engine awaits every action, hook,
//! and compensation before moving on, and never retries anything.

#![warn(missing_docs)]

// === Core Types ===
mod accumulator;
mod errors;
mod outcome;
mod stage;

// === Engine ===
mod saga;

// === Observability ===
mod observer;
mod stats;

// === Re-exports ===

// Types
pub use accumulator::Accumulator;
pub use outcome::SagaOutcome;
pub use stage::{Stage, StageDefinition, StageFuture};

// Errors
pub use errors::{RegistrationError, RollbackError};

// Engine
pub use saga::Saga;

// Observability
pub use observer::{NoOpObserver, SagaObserver, TracingObserver};
pub use stats::{SagaStats, SagaStatsSnapshot};
