use std::sync::Arc;

use common::storage::BlobGateway;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

/// Shared application state, constructed once in `main` and cloned into
/// every handler. The gateway and pool are owned here rather than by a
/// process-wide lazy global.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub gateway: Arc<dyn BlobGateway>,
    pub config: AppConfig,
}
