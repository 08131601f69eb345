use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the pet is doing right now, as reported by the collar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetStatus {
    Sleeping,
    Walking,
    Running,
    Playing,
    Eating,
    Idle,
}

impl PetStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            PetStatus::Sleeping => "Sleeping",
            PetStatus::Walking => "Walking",
            PetStatus::Running => "Running",
            PetStatus::Playing => "Playing",
            PetStatus::Eating => "Eating",
            PetStatus::Idle => "Idle",
        }
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PetLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// One telemetry reading from the collar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WearableData {
    pub timestamp: DateTime<Utc>,
    pub battery_level: u8,
    pub status: PetStatus,
    pub location: PetLocation,
    pub steps_today: u32,
}

/// Categories of notable events kept in the activity timeline. Not all of
/// them are produced by the simulator; the full set is part of the wire
/// contract with consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    WalkStart,
    WalkEnd,
    Meal,
    Play,
    SleepStart,
    SleepEnd,
    Treat,
    VetVisit,
    LocationUpdate,
}

/// A discrete, timestamped record of a notable status transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetActivityEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub activity_type: ActivityType,
    pub description: String,
    /// Material Symbol name the app renders next to the event.
    pub icon: String,
}
