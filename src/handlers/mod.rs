// HTTP handlers and route builders

pub mod docs;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod redirect;

use crate::{app::AppState, middleware::auth_middleware};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

// Recipe routes, each also served with a trailing slash.
// Everything except get-link requires a bearer token.
pub fn recipe_routes(state: AppState) -> Router<AppState> {
    let mut protected = Router::new();
    let mut public = Router::new();

    for suffix in ["", "/"] {
        protected = protected
            .route(
                &format!("/download_shopping_cart{}", suffix),
                get(recipes::download_shopping_cart),
            )
            .route(
                &format!("/{{id}}/shopping_cart{}", suffix),
                post(recipes::add_to_shopping_cart).delete(recipes::remove_from_shopping_cart),
            )
            .route(
                &format!("/{{id}}/favorite{}", suffix),
                post(recipes::add_to_favorites).delete(recipes::remove_from_favorites),
            );
        public = public.route(
            &format!("/{{id}}/get-link{}", suffix),
            get(recipes::get_short_link),
        );
    }

    public.merge(protected.route_layer(middleware::from_fn_with_state(state, auth_middleware)))
}

// Ingredient search, with and without the trailing slash
pub fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route("/api/ingredients", get(ingredients::search_ingredients))
        .route("/api/ingredients/", get(ingredients::search_ingredients))
}

// Short link redirect routes, with and without the trailing slash
pub fn redirect_routes() -> Router<AppState> {
    Router::new()
        .route("/s/{code}", get(redirect::redirect_to_recipe))
        .route("/s/{code}/", get(redirect::redirect_to_recipe))
}
