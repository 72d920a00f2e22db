//! Zone list sources.

use std::collections::HashMap;
use std::future::Future;

use crate::error::LoadError;
use crate::zone::{BuildingId, Zone};

pub mod http;
pub mod wire;

pub use http::HttpZoneSource;
pub use wire::ZoneRecord;

/// Backend collaborator: yields the zone list of a building.
///
/// Failures are never fatal; the controller falls back to its default zones.
pub trait BackendApi {
    fn list_zones(
        &self,
        building: BuildingId,
    ) -> impl Future<Output = Result<Vec<Zone>, LoadError>> + Send;
}

/// No backend at all. Every session uses the fallback zones.
#[derive(Debug, Default, Clone, Copy)]
pub struct Offline;

impl BackendApi for Offline {
    async fn list_zones(&self, _building: BuildingId) -> Result<Vec<Zone>, LoadError> {
        Err(LoadError::Unavailable)
    }
}

/// Fixed in-memory zone lists per building.
#[derive(Debug, Default, Clone)]
pub struct StaticZones {
    buildings: HashMap<BuildingId, Vec<Zone>>,
}

impl StaticZones {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_building(mut self, building: BuildingId, zones: Vec<Zone>) -> Self {
        self.buildings.insert(building, zones);
        self
    }
}

impl BackendApi for StaticZones {
    async fn list_zones(&self, building: BuildingId) -> Result<Vec<Zone>, LoadError> {
        match self.buildings.get(&building) {
            Some(zones) if zones.is_empty() => Err(LoadError::Empty),
            Some(zones) => Ok(zones.clone()),
            None => Err(LoadError::Status(404)),
        }
    }
}
