//! API Routes for the catalog
//!
//! Combines the record endpoints, the index page, health checks and static
//! serving of uploads into a single router.

mod files;
mod index;
pub mod status;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::services::upload::UPLOAD_URL_PREFIX;
use crate::AppState;

pub use files::{FilePart, UpdateDescriptionRequest, UploadForm};

/// Build the route table.
///
/// Route structure:
/// - / - HTML shell
/// - /api/files, /upload, /delete/:id, /update/:id - Record operations
/// - /health - Health check
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(index::routes())
        .merge(files::routes(state.config.storage.max_upload_size))
        .merge(status::routes())
}

/// Build the complete application: routes, uploaded file serving and
/// middleware, bound to `state`.
pub fn app(state: AppState) -> Router {
    let uploads = ServeDir::new(state.catalog.uploads().upload_dir());

    Router::new()
        .merge(routes(&state))
        .nest_service(UPLOAD_URL_PREFIX.trim_end_matches('/'), uploads)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
