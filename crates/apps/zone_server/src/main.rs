use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tour::defaults::MOLLA_HUSREV_MOSQUE;
use tour::BuildingId;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod zones;

#[derive(Clone)]
struct AppState {
    config: Arc<ServerConfig>,
}

#[derive(Clone, Debug)]
struct ServerConfig {
    addr: SocketAddr,
    /// Directory holding one `{building}.json` zone list per building.
    zones_root: PathBuf,
    /// Building answered from the built-in zone list when it has no file.
    default_building: BuildingId,
}

impl ServerConfig {
    fn from_env() -> anyhow::Result<Self> {
        let addr = env::var("ZONE_SERVER_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
            .parse()
            .context("invalid ZONE_SERVER_ADDR")?;
        let zones_root = env::var("ZONES_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/zones"));
        Ok(Self {
            addr,
            zones_root,
            default_building: BuildingId(env_var_i64(
                "DEFAULT_BUILDING_ID",
                MOLLA_HUSREV_MOSQUE.0,
            )),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env()?;
    let addr = config.addr;
    info!(
        "serving zones from {} (default building {})",
        config.zones_root.display(),
        config.default_building
    );

    let state = AppState {
        config: Arc::new(config),
    };
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("zone server listening on http://{addr}");
    axum::serve(listener, router(state))
        .await
        .context("zone server stopped")?;
    Ok(())
}

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/v1/yapilar/:id/ic-mekan-bolgeler", get(zones::get_zones))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

fn env_var_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
