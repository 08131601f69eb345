use crate::config::SimulatorConfig;
use crate::history::ActivityHistoryHandle;
use crate::model::{PetActivityEvent, PetLocation, PetStatus, WearableData};
use crate::transitions::transition_event;
use chrono::{DateTime, Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::info;
use uuid::Uuid;

const LOCATION_DRIFT_IDLE: f64 = 0.0001;
const LOCATION_DRIFT_WALKING: f64 = 0.001;
const LOCATION_DRIFT_RUNNING: f64 = 0.002;

/// Chance of sleeping (vs. idling) during the night window.
const NIGHT_SLEEP_PROBABILITY: f64 = 0.8;

/// Synthesizes collar telemetry for one pet.
///
/// The simulator owns all of its state, so independent simulations can run
/// side by side. The random source is caller-supplied; tests seed a
/// [`StdRng`] to get reproducible runs.
pub struct WearableSimulator<R> {
    config: SimulatorConfig,
    rng: R,
    battery_level: u8,
    last_status: PetStatus,
    last_location: PetLocation,
    steps_today: u32,
    history: ActivityHistoryHandle,
}

impl WearableSimulator<StdRng> {
    /// Simulator with an OS-seeded random source.
    pub fn new(config: SimulatorConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> WearableSimulator<R> {
    pub fn with_rng(config: SimulatorConfig, mut rng: R) -> Self {
        // The pet has usually been up and about before the app connects.
        let steps_today = rng.gen_range(500..2000);
        let history = ActivityHistoryHandle::new(config.history_capacity);
        Self {
            last_location: config.initial_location,
            config,
            rng,
            battery_level: 100,
            last_status: PetStatus::Idle,
            steps_today,
            history,
        }
    }

    /// Handle to the shared activity history, for the observer stream.
    pub fn history(&self) -> ActivityHistoryHandle {
        self.history.clone()
    }

    /// Runs one simulation step against the given wall-clock instant and
    /// returns the sample it produced.
    pub fn tick(&mut self, now: DateTime<Utc>) -> WearableData {
        let hour = now.hour();

        if self.battery_level > 0
            && self.rng.gen_range(0..100u32) < self.config.battery_drop_percent
        {
            self.battery_level -= 1;
        }

        let status = self.pick_status(hour);

        let drift = match status {
            PetStatus::Walking => LOCATION_DRIFT_WALKING,
            PetStatus::Running => LOCATION_DRIFT_RUNNING,
            _ => LOCATION_DRIFT_IDLE,
        };
        let lat_drift = (self.rng.gen::<f64>() - 0.5) * 2.0 * drift;
        let lon_drift = (self.rng.gen::<f64>() - 0.5) * 2.0 * drift;
        self.last_location = PetLocation {
            latitude: (self.last_location.latitude + lat_drift).clamp(-90.0, 90.0),
            longitude: (self.last_location.longitude + lon_drift).clamp(-180.0, 180.0),
        };

        if matches!(
            status,
            PetStatus::Walking | PetStatus::Running | PetStatus::Playing
        ) {
            self.steps_today += self.rng.gen_range(10..=50);
        }

        if let Some(template) = transition_event(self.last_status, status) {
            self.history.push(PetActivityEvent {
                id: Uuid::new_v4().to_string(),
                timestamp: now,
                activity_type: template.activity_type,
                description: template.description.to_string(),
                icon: template.icon.to_string(),
            });
        }
        self.last_status = status;

        WearableData {
            timestamp: now,
            battery_level: self.battery_level,
            status,
            location: self.last_location,
            steps_today: self.steps_today,
        }
    }

    fn pick_status(&mut self, hour: u32) -> PetStatus {
        if is_night(hour, self.config.night_start_hour, self.config.night_end_hour) {
            if self.rng.gen_bool(NIGHT_SLEEP_PROBABILITY) {
                PetStatus::Sleeping
            } else {
                PetStatus::Idle
            }
        } else {
            match self.rng.gen_range(0..10) {
                0 | 1 => PetStatus::Walking,
                2 => PetStatus::Running,
                3 | 4 => PetStatus::Playing,
                5 => PetStatus::Eating,
                _ => PetStatus::Idle,
            }
        }
    }
}

impl<R: Rng + Send + 'static> WearableSimulator<R> {
    /// Spawns the tick loop and returns the sample stream.
    ///
    /// The loop stops at the top of the next tick once the consumer is gone,
    /// so a cancelled stream leaves no partial-tick side effects behind.
    pub fn into_sample_stream(mut self) -> ReceiverStream<WearableData> {
        let (tx, rx) = mpsc::channel(16);
        let emission_interval = self.config.emission_interval;
        tokio::spawn(async move {
            info!(
                interval_ms = emission_interval.as_millis() as u64,
                "wearable sample stream started"
            );
            let mut ticker = tokio::time::interval(emission_interval);
            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    break;
                }
                let sample = self.tick(Utc::now());
                if tx.send(sample).await.is_err() {
                    break;
                }
            }
            info!("wearable sample stream stopped");
        });
        ReceiverStream::new(rx)
    }

    /// Convenience that wires up both streams with the configured intervals.
    pub fn into_streams(
        self,
    ) -> (
        ReceiverStream<WearableData>,
        ReceiverStream<Vec<PetActivityEvent>>,
    ) {
        let history = self.history();
        let poll_interval = self.config.history_poll_interval;
        let samples = self.into_sample_stream();
        (samples, activity_history_stream(history, poll_interval))
    }
}

/// Spawns the history observer loop and returns the snapshot stream.
///
/// Each poll takes a consistent copy of the shared history and emits it
/// (most recent first) only when its size changed since the last emission;
/// observation cadence is decoupled from the tick cadence that generates
/// events. Stops cleanly once the consumer is gone.
pub fn activity_history_stream(
    history: ActivityHistoryHandle,
    poll_interval: Duration,
) -> ReceiverStream<Vec<PetActivityEvent>> {
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        info!(
            poll_ms = poll_interval.as_millis() as u64,
            "activity history stream started"
        );
        let mut ticker = tokio::time::interval(poll_interval);
        let mut last_sent_len = 0usize;
        loop {
            ticker.tick().await;
            if tx.is_closed() {
                break;
            }
            let snapshot = history.snapshot_desc();
            if snapshot.len() != last_sent_len {
                last_sent_len = snapshot.len();
                if tx.send(snapshot).await.is_err() {
                    break;
                }
            }
        }
        info!("activity history stream stopped");
    });
    ReceiverStream::new(rx)
}

/// The night window may wrap midnight (e.g. 22 -> 6).
fn is_night(hour: u32, start: u32, end: u32) -> bool {
    if start <= end {
        hour >= start && hour < end
    } else {
        hour >= start || hour < end
    }
}
