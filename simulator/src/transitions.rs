use crate::model::{ActivityType, PetStatus};

/// Template for the event a qualifying status transition records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEvent {
    pub activity_type: ActivityType,
    pub description: &'static str,
    pub icon: &'static str,
}

const fn event(
    activity_type: ActivityType,
    description: &'static str,
    icon: &'static str,
) -> Option<TransitionEvent> {
    Some(TransitionEvent {
        activity_type,
        description,
        icon,
    })
}

/// Maps a (previous, next) status pair to the event it records, if any.
///
/// An unchanged status never records anything. Walking and running share the
/// walk-start category, and switching between the two mid-walk is not a new
/// walk; running keeps its own row so its description stays accurate.
pub fn transition_event(previous: PetStatus, next: PetStatus) -> Option<TransitionEvent> {
    use PetStatus::*;

    if previous == next {
        return None;
    }
    match (previous, next) {
        (_, Sleeping) => event(ActivityType::SleepStart, "Fell asleep", "bed"),
        (Walking, Running) | (Running, Walking) => None,
        (_, Walking) => event(ActivityType::WalkStart, "Started a walk", "directions_walk"),
        (_, Running) => event(ActivityType::WalkStart, "Started running", "directions_walk"),
        (_, Eating) => event(ActivityType::Meal, "Had a meal", "restaurant"),
        (_, Playing) => event(ActivityType::Play, "Started playing", "sports_esports"),
        (Sleeping, Idle) => event(ActivityType::SleepEnd, "Woke up", "bed"),
        _ => None,
    }
}
