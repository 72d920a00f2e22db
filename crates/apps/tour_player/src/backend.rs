use tour::{BackendApi, BuildingId, HttpZoneSource, LoadError, Offline, Zone};

/// Zone source picked from the command line.
pub enum PlayerBackend {
    Http(HttpZoneSource),
    Offline(Offline),
}

impl PlayerBackend {
    pub fn from_url(url: Option<&str>) -> Self {
        match url {
            Some(url) => PlayerBackend::Http(HttpZoneSource::new(url)),
            None => PlayerBackend::Offline(Offline),
        }
    }
}

impl BackendApi for PlayerBackend {
    async fn list_zones(&self, building: BuildingId) -> Result<Vec<Zone>, LoadError> {
        match self {
            PlayerBackend::Http(src) => src.list_zones(building).await,
            PlayerBackend::Offline(src) => src.list_zones(building).await,
        }
    }
}
