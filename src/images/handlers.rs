use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::{error, instrument, warn};

use super::services::{is_valid_filename, load_image};
use crate::state::AppState;

pub fn image_routes() -> Router<AppState> {
    Router::new().route("/images/:filename", get(get_image))
}

#[instrument(skip(state))]
pub async fn get_image(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    if !is_valid_filename(&filename) {
        warn!(%filename, "rejected image name");
        return (StatusCode::BAD_REQUEST, "Invalid image name").into_response();
    }

    match load_image(&state.config.images_dir, &filename).await {
        Ok(Some((body, content_type))) => {
            ([(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Image not found").into_response(),
        Err(e) => {
            error!(error = %e, %filename, "image read failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Image read failed").into_response()
        }
    }
}
