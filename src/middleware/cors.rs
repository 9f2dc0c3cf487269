use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, warn};

/// CORS policy for the API
///
/// A `*` entry reflects any origin outside production. Otherwise only the
/// listed origins are allowed.
pub fn cors_layer(allowed_origins: &[String], is_production: bool) -> CorsLayer {
    let has_wildcard = allowed_origins.iter().any(|o| o == "*");

    let allow_origin = if has_wildcard && !is_production {
        debug!("CORS: reflecting request origin");
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter(|o| o.as_str() != "*")
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("CORS: ignoring invalid origin {}", o);
                    None
                },
            })
            .collect();
        debug!("CORS: {} whitelisted origin(s)", origins.len());
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_DISPOSITION])
}
