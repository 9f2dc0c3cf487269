// OpenAPI document for the public endpoints

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::models::{Ingredient, RecipeSummary, ShortLinkResponse};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::recipes::download_shopping_cart,
        crate::handlers::recipes::get_short_link,
        crate::handlers::recipes::add_to_shopping_cart,
        crate::handlers::recipes::remove_from_shopping_cart,
        crate::handlers::recipes::add_to_favorites,
        crate::handlers::recipes::remove_from_favorites,
        crate::handlers::ingredients::search_ingredients,
        crate::handlers::redirect::redirect_to_recipe,
    ),
    components(schemas(Ingredient, RecipeSummary, ShortLinkResponse)),
    modifiers(&BearerAuth),
    tags(
        (name = "Recipes", description = "Shopping list, short link and membership endpoints"),
        (name = "Ingredients", description = "Ingredient search"),
        (name = "Redirect", description = "Short link resolution")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification at /api/openapi.json
pub async fn serve_openapi_spec() -> Response {
    match ApiDoc::openapi().to_json() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize OpenAPI document: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        },
    }
}
