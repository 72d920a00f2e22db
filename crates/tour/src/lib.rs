// Interior tour: zone registry and the tour state machine driving a renderer.
pub mod backend;
pub mod command;
pub mod config;
pub mod controller;
pub mod defaults;
pub mod error;
pub mod events;
pub mod registry;
pub mod renderer;
pub mod zone;

pub use backend::{BackendApi, HttpZoneSource, Offline, StaticZones};
pub use command::{CommandParseError, TourCommand};
pub use config::TourConfig;
pub use controller::{Playback, TourController};
pub use error::{ErrorKind, LoadError, TourError, TransitionFailure, ValidationError};
pub use events::{TourEndReason, TourEvent};
pub use registry::ZoneRegistry;
pub use renderer::{Basemap, Flight, FlightTicket, Renderer, ViewerPreset};
pub use zone::{BuildingId, CameraPose, LookAt, Zone, ZoneId, ZoneType};
