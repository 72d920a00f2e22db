use tracing::debug;

use super::BackendApi;
use super::wire::{ZoneRecord, zones_path};
use crate::error::LoadError;
use crate::zone::{BuildingId, Zone};

/// Fetches zone lists from the heritage backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpZoneSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpZoneSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn url_for(&self, building: BuildingId) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            zones_path(building.0)
        )
    }
}

impl BackendApi for HttpZoneSource {
    async fn list_zones(&self, building: BuildingId) -> Result<Vec<Zone>, LoadError> {
        let url = self.url_for(building);
        debug!("fetching zones: {url}");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Request(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(LoadError::Status(resp.status().as_u16()));
        }

        let records: Vec<ZoneRecord> = resp
            .json()
            .await
            .map_err(|e| LoadError::Decode(e.to_string()))?;
        if records.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(records.into_iter().map(Zone::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::HttpZoneSource;
    use crate::backend::BackendApi;
    use crate::backend::wire::ZoneRecord;
    use crate::defaults::molla_husrev_zones;
    use crate::error::LoadError;
    use crate::zone::{BuildingId, ZoneId};
    use axum::Router;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use tokio::net::TcpListener;

    async fn zones(Path(id): Path<i64>) -> Response {
        match id {
            1 => {
                let records: Vec<ZoneRecord> =
                    molla_husrev_zones().iter().map(ZoneRecord::from).collect();
                axum::Json(records).into_response()
            }
            2 => axum::Json(Vec::<ZoneRecord>::new()).into_response(),
            3 => (StatusCode::OK, "not json").into_response(),
            _ => (StatusCode::NOT_FOUND, "unknown building").into_response(),
        }
    }

    async fn serve() -> String {
        let app = Router::new().route("/api/v1/yapilar/:id/ic-mekan-bolgeler", get(zones));
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{addr}/")
    }

    #[test]
    fn url_joins_without_double_slash() {
        let src = HttpZoneSource::new("http://localhost:8000/");
        assert_eq!(
            src.url_for(BuildingId(5)),
            "http://localhost:8000/api/v1/yapilar/5/ic-mekan-bolgeler"
        );
    }

    #[tokio::test]
    async fn lists_zones_from_backend() {
        let src = HttpZoneSource::new(serve().await);
        let zones = src.list_zones(BuildingId(1)).await.expect("zones");
        assert_eq!(zones.len(), molla_husrev_zones().len());
        assert_eq!(zones[0].id, ZoneId::Num(1));
        assert!(zones[0].is_entrance);
    }

    #[tokio::test]
    async fn maps_failures_to_load_errors() {
        let src = HttpZoneSource::new(serve().await);
        assert_eq!(src.list_zones(BuildingId(2)).await, Err(LoadError::Empty));
        assert!(matches!(
            src.list_zones(BuildingId(3)).await,
            Err(LoadError::Decode(_))
        ));
        assert_eq!(
            src.list_zones(BuildingId(9)).await,
            Err(LoadError::Status(404))
        );
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let src = HttpZoneSource::new(format!("http://{addr}"));
        assert!(matches!(
            src.list_zones(BuildingId(1)).await,
            Err(LoadError::Request(_))
        ));
    }
}
