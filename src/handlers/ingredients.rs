use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::{
    app::AppState,
    models::{Ingredient, IngredientSearchParams},
    utils::service_error::ServiceError,
};

/// Search ingredients by case-insensitive name prefix
#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "Ingredients",
    operation_id = "searchIngredients",
    params(IngredientSearchParams),
    responses(
        (status = 200, description = "Matching ingredients ordered by name", body = [Ingredient]),
        (status = 400, description = "Bad request - validation failed")
    )
)]
pub async fn search_ingredients(
    State(state): State<AppState>,
    Query(params): Query<IngredientSearchParams>,
) -> Result<Json<Vec<Ingredient>>, ServiceError> {
    params.validate()?;

    let ingredients = state
        .repository
        .search_ingredients(params.prefix())
        .await?;

    Ok(Json(ingredients))
}
