use std::sync::Arc;

use common::storage::BlobGateway;
use common::storage::memory::UnconfiguredGateway;
use common::storage::s3::{S3Gateway, S3Settings};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use server::config::{AppConfig, StorageConfig};
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;

    let db = server::database::init_db(&config.database.url).await?;

    let gateway = build_gateway(&config.storage)?;

    let state = AppState {
        db,
        gateway,
        config: config.clone(),
    };

    let app = server::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Construct the storage gateway once, up front.
///
/// Incomplete settings do not abort startup: the process runs with a
/// gateway whose every call reports what is missing, so only the requests
/// that actually need storage fail.
fn build_gateway(storage: &StorageConfig) -> anyhow::Result<Arc<dyn BlobGateway>> {
    let missing = storage.missing_settings();
    if !missing.is_empty() {
        warn!(
            "object storage not configured ({}); storage-backed requests will fail",
            missing.join(", ")
        );
        return Ok(Arc::new(UnconfiguredGateway::new(&missing)));
    }

    let settings = S3Settings {
        region: storage.region.clone(),
        endpoint: storage.endpoint.clone(),
        bucket: storage.bucket.clone(),
        access_key_id: storage.access_key_id.clone(),
        secret_access_key: storage.secret_access_key.clone(),
        path_style: storage.path_style,
    };

    Ok(Arc::new(S3Gateway::new(&settings)?))
}
