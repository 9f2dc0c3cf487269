// Short link redirect handler

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::{app::AppState, services::ShortLinkService, utils::service_error::ServiceError};

/// Resolve a short code and redirect to the recipe page
/// GET /s/{code}
#[utoipa::path(
    get,
    path = "/s/{code}",
    tag = "Redirect",
    operation_id = "redirectShortLink",
    params(("code" = String, Path, description = "Short code", example = "AbC")),
    responses(
        (status = 302, description = "Redirect to the full recipe URL"),
        (status = 404, description = "Unknown short code")
    )
)]
pub async fn redirect_to_recipe(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Response {
    match ShortLinkService::new(&state).resolve(&code).await {
        Ok(link) => {
            info!("Redirecting {} to {}", code, link.full_url);
            (StatusCode::FOUND, [(header::LOCATION, link.full_url)]).into_response()
        },
        Err(ServiceError::NotFound) => {
            warn!("Short code not found: {}", code);
            ServiceError::NotFound.into_response()
        },
        Err(e) => e.into_response(),
    }
}
