use serde::{Deserialize, Serialize};

use crate::renderer::ViewerPreset;
use crate::zone::CameraPose;

/// Controller tuning. Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    /// Duration of every zone-to-zone camera move.
    pub transition_seconds: f64,
    /// Extra time a move may take before it is reported as timed out.
    pub transition_timeout_grace_seconds: f64,
    /// Outdoor view the camera returns to on exit.
    pub home_pose: CameraPose,
    pub home_flight_seconds: f64,
    pub interior_preset: ViewerPreset,
    pub outdoor_preset: ViewerPreset,
    /// Zoom limits while roaming freely, tight enough to stay inside the building.
    pub free_roam_min_zoom_m: f64,
    pub free_roam_max_zoom_m: f64,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            transition_seconds: 2.0,
            transition_timeout_grace_seconds: 3.0,
            // Looking north at Molla Hüsrev Mosque from 250 m, slightly south of it.
            home_pose: CameraPose {
                longitude: 28.9593,
                latitude: 41.0115,
                height: 250.0,
                heading: 0.0,
                pitch: -35.0,
                roll: 0.0,
            },
            home_flight_seconds: 2.0,
            interior_preset: ViewerPreset::interior(),
            outdoor_preset: ViewerPreset::outdoor(),
            free_roam_min_zoom_m: 1.0,
            free_roam_max_zoom_m: 50.0,
        }
    }
}

impl TourConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let mut cfg: TourConfig = serde_json::from_str(raw)?;
        cfg.transition_seconds = cfg.transition_seconds.max(0.0);
        cfg.transition_timeout_grace_seconds = cfg.transition_timeout_grace_seconds.max(0.0);
        cfg.home_flight_seconds = cfg.home_flight_seconds.max(0.0);
        cfg.free_roam_min_zoom_m = cfg.free_roam_min_zoom_m.max(0.0);
        cfg.free_roam_max_zoom_m = cfg.free_roam_max_zoom_m.max(cfg.free_roam_min_zoom_m);
        Ok(cfg)
    }

    /// Time after which an unfinished move counts as failed.
    pub fn transition_deadline_seconds(&self) -> f64 {
        self.transition_seconds + self.transition_timeout_grace_seconds
    }
}
