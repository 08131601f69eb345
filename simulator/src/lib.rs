//! Simulated pet-wearable telemetry.
//!
//! Produces the two feeds the companion app consumes: a periodic
//! [`WearableData`] sample stream and a bounded history of
//! [`PetActivityEvent`]s derived from status transitions. Everything here is
//! an in-process generator; there is no I/O beyond timers.

pub mod config;
pub mod history;
pub mod model;
pub mod sim;
pub mod transitions;

pub use config::SimulatorConfig;
pub use history::{ActivityHistory, ActivityHistoryHandle};
pub use model::{ActivityType, PetActivityEvent, PetLocation, PetStatus, WearableData};
pub use sim::{activity_history_stream, WearableSimulator};
