//! Renderer collaborator seam.
//!
//! The controller never waits on the renderer. It hands over a [`Flight`] and
//! later receives the outcome through `TourController::transition_finished`,
//! matched by the flight's [`FlightTicket`].

use std::fmt;
use std::str::FromStr;

use foundation::ids::{Generation, Sequence};
use foundation::time::Time;
use serde::{Deserialize, Serialize};

use crate::zone::{CameraPose, LookAt, ZoneId};

/// Identifies one transition request: the session it belongs to and its place
/// in that session's request sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FlightTicket {
    pub generation: Generation,
    pub seq: Sequence,
}

/// Animated camera move towards a zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub ticket: FlightTicket,
    pub zone_id: ZoneId,
    pub pose: CameraPose,
    /// Only set when the renderer reports look-at support.
    pub look_at: Option<LookAt>,
    pub duration_s: f64,
    pub requested_at: Time,
}

impl Flight {
    /// Simulation time at which the move is expected to settle.
    pub fn expected_end(&self) -> Time {
        self.requested_at.after(self.duration_s)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Basemap {
    #[default]
    Satellite,
    Osm,
    CartoVoyager,
    OpenTopo,
    StamenTerrain,
    CartoPositron,
    CartoDark,
}

impl Basemap {
    pub const ALL: [Basemap; 7] = [
        Basemap::Satellite,
        Basemap::Osm,
        Basemap::CartoVoyager,
        Basemap::OpenTopo,
        Basemap::StamenTerrain,
        Basemap::CartoPositron,
        Basemap::CartoDark,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Basemap::Satellite => "satellite",
            Basemap::Osm => "osm",
            Basemap::CartoVoyager => "cartoVoyager",
            Basemap::OpenTopo => "openTopo",
            Basemap::StamenTerrain => "stamenTerrain",
            Basemap::CartoPositron => "cartoPositron",
            Basemap::CartoDark => "cartoDark",
        }
    }
}

impl fmt::Display for Basemap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Basemap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Basemap::ALL
            .into_iter()
            .find(|b| b.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown basemap: {s}"))
    }
}

/// Named viewer configuration applied when switching between outdoor and interior views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerPreset {
    pub name: String,
    pub terrain: bool,
    pub globe_visible: bool,
    pub basemap: Basemap,
}

impl Default for ViewerPreset {
    fn default() -> Self {
        Self::outdoor()
    }
}

impl ViewerPreset {
    /// Satellite imagery, ellipsoid terrain so building models keep their placement.
    pub fn outdoor() -> Self {
        Self {
            name: "outdoor".to_string(),
            terrain: false,
            globe_visible: true,
            basemap: Basemap::Satellite,
        }
    }

    /// Globe hidden so the interior tileset is not occluded.
    pub fn interior() -> Self {
        Self {
            name: "interior".to_string(),
            terrain: false,
            globe_visible: false,
            basemap: Basemap::Satellite,
        }
    }
}

pub trait Renderer {
    fn apply_preset(&mut self, preset: &ViewerPreset);

    /// Starts a camera move. A newer flight supersedes any move still in progress.
    fn fly_to(&mut self, flight: Flight);

    /// Returns the camera to the outdoor home view. No completion is reported.
    fn fly_home(&mut self, pose: &CameraPose, duration_s: f64);

    /// Loads the building's interior 3D model. An error carries the reason and
    /// does not prevent entering.
    fn load_interior_model(&mut self, asset_id: u64) -> Result<(), String>;

    fn unload_interior_model(&mut self);

    /// Hands the camera to the user, keeping the zoom distance within the given range.
    fn enable_free_roam(&mut self, min_zoom_m: f64, max_zoom_m: f64);

    fn supports_look_at(&self) -> bool {
        false
    }
}
