use chrono::{DateTime, Duration, Utc};
use crate::tracker::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    RotatingWait,
    Refreshing,
    Rotate
}

/// Refresh and rotation cadences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    pub refresh: Duration,
    pub rotation: Duration
}

/// Mutable state of the display loop. The location index always addresses one
/// of `location_count` locations.
#[derive(Debug, Clone)]
pub struct DisplayState {
    location_index: usize,
    location_count: usize,
    pub selected: Option<Selection>,
    pub last_refresh: Option<DateTime<Utc>>,     // None until the current location is first shown
    pub last_rotation: DateTime<Utc>,
    pub phase: LoopPhase
}

impl DisplayState {
    pub fn new(location_count: usize, now: DateTime<Utc>) -> Self {
        Self {
            location_index: 0,
            location_count: location_count.max(1),
            selected: None,
            last_refresh: None,
            last_rotation: now,
            phase: LoopPhase::RotatingWait
        }
    }

    pub fn location_index(&self) -> usize { self.location_index }

    /// Moves to the next location and makes its first refresh due immediately
    pub fn advance(&mut self, now: DateTime<Utc>) {
        self.location_index = (self.location_index + 1) % self.location_count;
        self.last_rotation = now;
        self.last_refresh = None;
        self.selected = None;
    }

    pub fn rotation_due(&self, now: DateTime<Utc>, schedule: &Schedule) -> bool {
        now - self.last_rotation >= schedule.rotation
    }

    pub fn refresh_due(&self, now: DateTime<Utc>, schedule: &Schedule) -> bool {
        self.last_refresh.map_or(true, |last| now - last >= schedule.refresh)
    }

    /// Earliest time either timer elapses
    pub fn next_event(&self, now: DateTime<Utc>, schedule: &Schedule) -> DateTime<Utc> {
        let refresh = self.last_refresh.map_or(now, |last| last + schedule.refresh);
        refresh.min(self.last_rotation + schedule.rotation)
    }
}
