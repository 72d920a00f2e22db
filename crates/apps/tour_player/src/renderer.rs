use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tour::{CameraPose, Flight, FlightTicket, Renderer, ViewerPreset};
use tracing::{debug, info};

/// Stand-in for a 3D viewer: every camera move lands after its duration,
/// scaled to wall-clock time, and reports back over a channel.
pub struct SimulatedRenderer {
    done: UnboundedSender<FlightTicket>,
    time_scale: f64,
}

impl SimulatedRenderer {
    pub fn new(done: UnboundedSender<FlightTicket>, time_scale: f64) -> Self {
        Self { done, time_scale }
    }
}

impl Renderer for SimulatedRenderer {
    fn apply_preset(&mut self, preset: &ViewerPreset) {
        info!(
            preset = %preset.name,
            basemap = %preset.basemap,
            globe = preset.globe_visible,
            "viewer preset"
        );
    }

    fn fly_to(&mut self, flight: Flight) {
        debug!(
            zone = %flight.zone_id,
            heading = flight.pose.heading,
            pitch = flight.pose.pitch,
            "camera flight"
        );
        let done = self.done.clone();
        let wait = Duration::from_secs_f64(flight.duration_s.max(0.0) / self.time_scale);
        tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            // Receiver gone means the player is shutting down.
            let _ = done.send(flight.ticket);
        });
    }

    fn fly_home(&mut self, pose: &CameraPose, duration_s: f64) {
        info!(
            lon = pose.longitude,
            lat = pose.latitude,
            height = pose.height,
            duration_s,
            "returning to home view"
        );
    }

    fn load_interior_model(&mut self, asset_id: u64) -> Result<(), String> {
        // No tileset streaming in the terminal; the model is only acknowledged.
        info!(asset_id, "interior model");
        Ok(())
    }

    fn unload_interior_model(&mut self) {
        debug!("interior model unloaded");
    }

    fn enable_free_roam(&mut self, min_zoom_m: f64, max_zoom_m: f64) {
        info!(min_zoom_m, max_zoom_m, "free camera");
    }

    fn supports_look_at(&self) -> bool {
        true
    }
}
