use crate::model::PetLocation;
use std::time::Duration;

/// Tuning knobs for the wearable simulator. The defaults are the values the
/// companion app ships with.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Cadence of the sample tick loop.
    pub emission_interval: Duration,
    /// Cadence of the history observer; a third of the 30s activity cadence,
    /// so snapshots surface well before the next event is due.
    pub history_poll_interval: Duration,
    /// Bounded activity-history capacity. Oldest entries are evicted first.
    pub history_capacity: usize,
    /// Night window, hour-of-day. May wrap midnight (22 -> 6).
    pub night_start_hour: u32,
    pub night_end_hour: u32,
    /// Chance (percent, per tick) that the battery drops one point.
    pub battery_drop_percent: u32,
    pub initial_location: PetLocation,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            emission_interval: Duration::from_secs(5),
            history_poll_interval: Duration::from_secs(10),
            history_capacity: 100,
            night_start_hour: 22,
            night_end_hour: 6,
            battery_drop_percent: 5,
            // Los Angeles
            initial_location: PetLocation {
                latitude: 34.0522,
                longitude: -118.2437,
            },
        }
    }
}
