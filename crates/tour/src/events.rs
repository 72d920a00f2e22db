use serde::Serialize;

use crate::controller::Playback;
use crate::error::ErrorKind;
use crate::zone::{BuildingId, Zone};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TourEndReason {
    /// Auto-play advanced past the last zone.
    Completed,
    /// The user stopped the tour.
    Stopped,
}

/// Notifications for the UI, drained from the controller after each command or tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TourEvent {
    SessionEntered {
        building: BuildingId,
        zone_count: usize,
        used_fallback: bool,
    },
    SessionExited {
        building: Option<BuildingId>,
    },
    ZoneChanged {
        zone: Zone,
        index: usize,
        total: usize,
    },
    ZoneAdded {
        zone: Zone,
        index: usize,
        total: usize,
    },
    TourProgress {
        index: usize,
        total: usize,
        fraction: f64,
    },
    PlaybackChanged {
        playback: Playback,
    },
    TourEnded {
        reason: TourEndReason,
    },
    FreeRoamEnabled {
        min_zoom_m: f64,
        max_zoom_m: f64,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

impl TourEvent {
    /// Progress notification for the zone at `index`.
    pub fn progress(index: usize, total: usize) -> Self {
        let fraction = if total == 0 {
            0.0
        } else {
            (index + 1) as f64 / total as f64
        };
        TourEvent::TourProgress {
            index,
            total,
            fraction,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            TourEvent::SessionEntered { .. } => "session_entered",
            TourEvent::SessionExited { .. } => "session_exited",
            TourEvent::ZoneChanged { .. } => "zone_changed",
            TourEvent::ZoneAdded { .. } => "zone_added",
            TourEvent::TourProgress { .. } => "tour_progress",
            TourEvent::PlaybackChanged { .. } => "playback_changed",
            TourEvent::TourEnded { .. } => "tour_ended",
            TourEvent::FreeRoamEnabled { .. } => "free_roam_enabled",
            TourEvent::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TourEndReason, TourEvent};
    use serde_json::json;

    #[test]
    fn progress_fraction_is_one_based() {
        assert_eq!(
            TourEvent::progress(0, 4),
            TourEvent::TourProgress {
                index: 0,
                total: 4,
                fraction: 0.25
            }
        );
        assert_eq!(
            TourEvent::progress(3, 4),
            TourEvent::TourProgress {
                index: 3,
                total: 4,
                fraction: 1.0
            }
        );
    }

    #[test]
    fn serializes_with_event_tag() {
        let v = serde_json::to_value(TourEvent::TourEnded {
            reason: TourEndReason::Completed,
        })
        .unwrap();
        assert_eq!(v, json!({"event": "tour_ended", "reason": "completed"}));
    }
}
