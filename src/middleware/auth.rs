// Authentication for protected routes
// Validates bearer tokens and injects AuthenticatedUser into request extensions

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{app::AppState, utils::service_error::ServiceError};

/// User resolved from a verified access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware that rejects requests without a valid token
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let user_id = match bearer_token(&parts) {
        Some(token) => match app_state.jwt_service.authenticate(token) {
            Ok(user_id) => user_id,
            Err(e) => {
                tracing::warn!("JWT validation failed: {}", e);
                return ServiceError::Unauthorized.into_response();
            },
        },
        None => return ServiceError::Unauthorized.into_response(),
    };

    parts.extensions.insert(AuthenticatedUser { user_id });
    next.run(Request::from_parts(parts, body)).await
}

/// Extractor for handlers behind `auth_middleware`
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(ServiceError::Unauthorized)
    }
}
