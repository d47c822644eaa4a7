use anyhow::Result;
use sea_orm::Database;

use crate::schemas::AppState;

/// Connect to the store and build the shared application state.
///
/// The connection pool lives here at the composition root and is injected
/// into handlers through [`AppState`]; there is no module-level singleton.
pub async fn initialize_app_state(database_url: &str) -> Result<AppState> {
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    Ok(AppState { db })
}
