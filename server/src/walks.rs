use chrono::{DateTime, Utc};
use serde::Serialize;
use simulator::{PetLocation, PetStatus, WearableData};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// The drawn path keeps only the most recent points.
const PATH_CAPACITY: usize = 100;

/// Great-circle distance between two coordinates, in meters.
pub fn haversine_meters(a: PetLocation, b: PetLocation) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

#[derive(Debug, Clone)]
struct WalkSession {
    started_at: DateTime<Utc>,
    distance_meters: f64,
    path: Vec<PetLocation>,
}

/// What the walking screen shows about the current session.
#[derive(Debug, Clone, Serialize)]
pub struct WalkSummary {
    pub active: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub duration_seconds: i64,
    pub distance_meters: f64,
    pub path: Vec<PetLocation>,
}

/// Folds wearable samples into walk-session state.
///
/// A session opens on the first Walking or Running sample, accumulates
/// distance between consecutive points, and closes as soon as the status
/// leaves the pair.
#[derive(Debug, Default)]
pub struct WalkTracker {
    session: Option<WalkSession>,
}

impl WalkTracker {
    pub fn update(&mut self, sample: &WearableData) {
        let on_the_move = matches!(sample.status, PetStatus::Walking | PetStatus::Running);
        if !on_the_move {
            self.session = None;
            return;
        }

        let session = self.session.get_or_insert_with(|| WalkSession {
            started_at: sample.timestamp,
            distance_meters: 0.0,
            path: Vec::new(),
        });
        if let Some(last) = session.path.last().copied() {
            session.distance_meters += haversine_meters(last, sample.location);
        }
        session.path.push(sample.location);
        if session.path.len() > PATH_CAPACITY {
            session.path.remove(0);
        }
    }

    pub fn summary(&self, now: DateTime<Utc>) -> WalkSummary {
        match &self.session {
            Some(session) => WalkSummary {
                active: true,
                started_at: Some(session.started_at),
                duration_seconds: (now - session.started_at).num_seconds().max(0),
                distance_meters: session.distance_meters,
                path: session.path.clone(),
            },
            None => WalkSummary {
                active: false,
                started_at: None,
                duration_seconds: 0,
                distance_meters: 0.0,
                path: Vec::new(),
            },
        }
    }
}
