use std::io::ErrorKind;

use anyhow::Context;
use axum::extract::{Path as AxumPath, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tour::backend::ZoneRecord;
use tour::defaults::molla_husrev_zones;
use tour::{Zone, ZoneRegistry};
use tracing::{error, warn};

use crate::AppState;

pub async fn get_zones(State(state): State<AppState>, AxumPath(id): AxumPath<i64>) -> Response {
    let path = state.config.zones_root.join(format!("{id}.json"));
    match tokio::fs::read(&path).await {
        Ok(bytes) => match parse_zone_file(&bytes) {
            Ok(records) => Json(records).into_response(),
            Err(err) => {
                error!("zone file {} rejected: {err:#}", path.display());
                (StatusCode::INTERNAL_SERVER_ERROR, "zone data invalid").into_response()
            }
        },
        Err(err) if err.kind() == ErrorKind::NotFound => {
            if id == state.config.default_building.0 {
                Json(default_records()).into_response()
            } else {
                warn!("no zones for building {id}");
                (StatusCode::NOT_FOUND, "building has no interior zones").into_response()
            }
        }
        Err(err) => {
            error!("reading {} failed: {err}", path.display());
            (StatusCode::INTERNAL_SERVER_ERROR, "zone data unavailable").into_response()
        }
    }
}

/// Decodes a zone file and checks it would load into a registry.
fn parse_zone_file(bytes: &[u8]) -> anyhow::Result<Vec<ZoneRecord>> {
    let records: Vec<ZoneRecord> = serde_json::from_slice(bytes).context("decoding zone list")?;
    let zones: Vec<Zone> = records.iter().cloned().map(Zone::from).collect();
    ZoneRegistry::new()
        .load(zones)
        .context("validating zone list")?;
    Ok(records)
}

fn default_records() -> Vec<ZoneRecord> {
    molla_husrev_zones().iter().map(ZoneRecord::from).collect()
}
