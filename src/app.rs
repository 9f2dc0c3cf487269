// Application state and router assembly
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    db::Repository,
    handlers,
    middleware::cors::cors_layer,
    services::{JwtService, RecipeUrlBuilder, ShortCodeGenerator},
};

// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn Repository>,
    pub jwt_service: Arc<JwtService>,
    pub short_code_generator: Arc<ShortCodeGenerator>,
    pub url_builder: Arc<RecipeUrlBuilder>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn Repository>,
        jwt_service: JwtService,
        short_code_generator: ShortCodeGenerator,
        url_builder: RecipeUrlBuilder,
    ) -> Self {
        Self {
            repository,
            jwt_service: Arc::new(jwt_service),
            short_code_generator: Arc::new(short_code_generator),
            url_builder: Arc::new(url_builder),
        }
    }
}

/// Build the full HTTP router
pub fn build_router(state: AppState, cors_allowed_origins: &[String], is_production: bool) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/openapi.json", get(handlers::docs::serve_openapi_spec))
        .nest("/api/recipes", handlers::recipe_routes(state.clone()))
        .merge(handlers::ingredient_routes())
        .merge(handlers::redirect_routes())
        .layer(cors_layer(cors_allowed_origins, is_production))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
