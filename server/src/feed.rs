use crate::metrics::{ACTIVITY_SNAPSHOTS_TOTAL, INVALID_SAMPLES_TOTAL, SAMPLES_TOTAL};
use crate::validate::validate;
use crate::walks::WalkTracker;
use simulator::{PetActivityEvent, WearableData};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

/// Shared state fed by the simulator streams and read by the REST handlers.
#[derive(Clone)]
pub struct TelemetryState {
    pub latest: watch::Receiver<Option<WearableData>>,
    pub history: Arc<RwLock<Vec<PetActivityEvent>>>,
    pub walks: Arc<RwLock<WalkTracker>>,
}

/// Drives both simulator streams into the shared state.
///
/// Samples are validated before publication; out-of-range ones are counted
/// and dropped. Exits once both streams have ended.
pub async fn run_feed(
    mut samples: ReceiverStream<WearableData>,
    mut snapshots: ReceiverStream<Vec<PetActivityEvent>>,
    latest_tx: watch::Sender<Option<WearableData>>,
    history: Arc<RwLock<Vec<PetActivityEvent>>>,
    walks: Arc<RwLock<WalkTracker>>,
) {
    info!("telemetry feed started");

    let mut samples_done = false;
    let mut snapshots_done = false;
    while !(samples_done && snapshots_done) {
        tokio::select! {
            sample = samples.next(), if !samples_done => match sample {
                Some(sample) => {
                    SAMPLES_TOTAL.inc();
                    if let Err(e) = validate(&sample) {
                        warn!("dropping out-of-range sample: {}", e);
                        INVALID_SAMPLES_TOTAL.inc();
                        continue;
                    }
                    debug!(status = %sample.status, battery = sample.battery_level, "sample received");
                    walks.write().await.update(&sample);
                    // A send only fails once every receiver is gone.
                    let _ = latest_tx.send(Some(sample));
                }
                None => samples_done = true,
            },
            snapshot = snapshots.next(), if !snapshots_done => match snapshot {
                Some(snapshot) => {
                    ACTIVITY_SNAPSHOTS_TOTAL.inc();
                    debug!(events = snapshot.len(), "activity snapshot received");
                    *history.write().await = snapshot;
                }
                None => snapshots_done = true,
            },
        }
    }

    info!("telemetry feed stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use simulator::{PetLocation, PetStatus};
    use tokio::sync::mpsc;

    fn sample(status: PetStatus, latitude: f64) -> WearableData {
        WearableData {
            timestamp: Utc::now(),
            battery_level: 88,
            status,
            location: PetLocation {
                latitude,
                longitude: -118.2437,
            },
            steps_today: 640,
        }
    }

    #[tokio::test]
    async fn test_feed_publishes_valid_samples_and_drops_invalid_ones() {
        let (sample_tx, sample_rx) = mpsc::channel(8);
        let (snapshot_tx, snapshot_rx) = mpsc::channel(8);
        let (latest_tx, latest_rx) = watch::channel(None);
        let history = Arc::new(RwLock::new(Vec::new()));
        let walks = Arc::new(RwLock::new(WalkTracker::default()));

        let feed = tokio::spawn(run_feed(
            ReceiverStream::new(sample_rx),
            ReceiverStream::new(snapshot_rx),
            latest_tx,
            history.clone(),
            walks.clone(),
        ));

        sample_tx.send(sample(PetStatus::Walking, 34.0522)).await.unwrap();
        // Latitude far out of range: must never reach the watch channel.
        sample_tx.send(sample(PetStatus::Walking, 91.0)).await.unwrap();
        sample_tx.send(sample(PetStatus::Idle, 34.0523)).await.unwrap();

        drop(sample_tx);
        drop(snapshot_tx);
        feed.await.unwrap();

        let latest = latest_rx.borrow().clone().expect("no sample published");
        assert_eq!(latest.status, PetStatus::Idle);
        assert_eq!(latest.location.latitude, 34.0523);
        // The walk opened on the first sample and closed on the idle one.
        assert!(!walks.read().await.summary(Utc::now()).active);
    }

    #[tokio::test]
    async fn test_feed_stores_latest_snapshot() {
        let (sample_tx, sample_rx) = mpsc::channel::<WearableData>(8);
        let (snapshot_tx, snapshot_rx) = mpsc::channel(8);
        let (latest_tx, _latest_rx) = watch::channel(None);
        let history = Arc::new(RwLock::new(Vec::new()));
        let walks = Arc::new(RwLock::new(WalkTracker::default()));

        let feed = tokio::spawn(run_feed(
            ReceiverStream::new(sample_rx),
            ReceiverStream::new(snapshot_rx),
            latest_tx,
            history.clone(),
            walks,
        ));

        let event = PetActivityEvent {
            id: "e1".to_string(),
            timestamp: Utc::now(),
            activity_type: simulator::ActivityType::Meal,
            description: "Had a meal".to_string(),
            icon: "restaurant".to_string(),
        };
        snapshot_tx.send(vec![event.clone()]).await.unwrap();
        drop(snapshot_tx);
        drop(sample_tx);
        feed.await.unwrap();

        let stored = history.read().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "e1");
    }
}
