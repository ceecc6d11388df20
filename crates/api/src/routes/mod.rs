pub mod export;
pub mod health;

use axum::Router;
use campaign_export_core::artifact::DOWNLOADS_PATH;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    let downloads = ServeDir::new(&state.config().export_dir);

    Router::new()
        .merge(health::routes())
        .merge(export::routes())
        .nest_service(DOWNLOADS_PATH, downloads)
        .with_state(state)
}
