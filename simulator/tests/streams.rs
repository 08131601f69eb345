use chrono::{Duration as ChronoDuration, Utc};
use simulator::{
    activity_history_stream, ActivityHistoryHandle, ActivityType, PetActivityEvent,
    SimulatorConfig, WearableSimulator,
};
use std::time::Duration;
use tokio::time::timeout;
use tokio_stream::StreamExt;

fn fast_config() -> SimulatorConfig {
    SimulatorConfig {
        emission_interval: Duration::from_millis(10),
        history_poll_interval: Duration::from_millis(20),
        ..SimulatorConfig::default()
    }
}

fn synthetic_event(tag: &str, offset_secs: i64) -> PetActivityEvent {
    PetActivityEvent {
        id: tag.to_string(),
        timestamp: Utc::now() + ChronoDuration::seconds(offset_secs),
        activity_type: ActivityType::Meal,
        description: "Had a meal".to_string(),
        icon: "restaurant".to_string(),
    }
}

#[tokio::test]
async fn sample_stream_holds_telemetry_invariants() {
    let sim = WearableSimulator::new(fast_config());
    let history = sim.history();
    let mut samples = sim.into_sample_stream();

    let mut previous_battery = 100u8;
    let mut previous_steps: Option<u32> = None;
    for _ in 0..50 {
        let sample = timeout(Duration::from_secs(5), samples.next())
            .await
            .expect("stream stalled")
            .expect("stream ended");

        assert!(sample.battery_level <= 100);
        assert!(sample.battery_level <= previous_battery);
        previous_battery = sample.battery_level;

        assert!((-90.0..=90.0).contains(&sample.location.latitude));
        assert!((-180.0..=180.0).contains(&sample.location.longitude));

        if let Some(previous) = previous_steps {
            assert!(sample.steps_today >= previous);
        }
        previous_steps = Some(sample.steps_today);
    }

    assert!(history.len() <= 100);
}

#[tokio::test]
async fn sample_timestamps_are_monotonic() {
    let sim = WearableSimulator::new(fast_config());
    let mut samples = sim.into_sample_stream();

    let mut previous = None;
    for _ in 0..20 {
        let sample = samples.next().await.expect("stream ended");
        if let Some(previous) = previous {
            assert!(sample.timestamp >= previous);
        }
        previous = Some(sample.timestamp);
    }
}

#[tokio::test]
async fn history_stream_emits_only_on_growth() {
    let history = ActivityHistoryHandle::new(100);
    let mut snapshots = activity_history_stream(history.clone(), Duration::from_millis(10));

    history.push(synthetic_event("first", 0));
    let snapshot = timeout(Duration::from_secs(5), snapshots.next())
        .await
        .expect("no snapshot for first event")
        .expect("stream ended");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, "first");

    // No growth, no emission.
    let idle = timeout(Duration::from_millis(100), snapshots.next()).await;
    assert!(idle.is_err(), "snapshot emitted without history growth");

    history.push(synthetic_event("second", 1));
    history.push(synthetic_event("third", 2));
    // A poll may land between the two pushes, so allow an intermediate
    // snapshot before the full one.
    let mut snapshot = Vec::new();
    while snapshot.len() < 3 {
        snapshot = timeout(Duration::from_secs(5), snapshots.next())
            .await
            .expect("no snapshot after growth")
            .expect("stream ended");
    }
    assert_eq!(snapshot.len(), 3);
    // Most recent first.
    assert_eq!(snapshot[0].id, "third");
    assert_eq!(snapshot[2].id, "first");
}

#[tokio::test]
async fn history_snapshots_never_shrink() {
    let sim = WearableSimulator::new(fast_config());
    let (samples, mut snapshots) = sim.into_streams();
    // Keep the producer ticking while we watch the history.
    let driver = tokio::spawn(async move {
        let mut samples = samples;
        while samples.next().await.is_some() {}
    });

    let mut previous_len = 0usize;
    for _ in 0..3 {
        match timeout(Duration::from_secs(5), snapshots.next()).await {
            Ok(Some(snapshot)) => {
                assert!(snapshot.len() > previous_len);
                previous_len = snapshot.len();
            }
            // Slow transition luck; the sizes we did see never shrank.
            _ => break,
        }
    }

    driver.abort();
}
