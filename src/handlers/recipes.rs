// Recipe endpoints: shopping list download, short links, cart and favorites

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    app::AppState,
    middleware::AuthenticatedUser,
    models::{RecipeList, RecipeSummary, ShortLinkResponse},
    services::{
        MembershipService, ShoppingListAggregator, ShortLinkService, SHOPPING_LIST_FILENAME,
    },
    utils::service_error::ServiceError,
};

pub const EMPTY_SHOPPING_LIST_MESSAGE: &str = "Shopping list is empty.";

// =============================================================================
// SHOPPING LIST
// =============================================================================

/// Download the aggregated shopping list as a text file
#[utoipa::path(
    get,
    path = "/api/recipes/download_shopping_cart",
    tag = "Recipes",
    operation_id = "downloadShoppingCart",
    responses(
        (status = 200, description = "Shopping list attachment", content_type = "text/plain"),
        (status = 204, description = "Shopping cart is empty"),
        (status = 401, description = "Unauthorized - invalid or missing token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> Result<Response, ServiceError> {
    let aggregator = ShoppingListAggregator::new(&state);

    let response = match aggregator.generate(auth_user.user_id).await? {
        Some(report) => (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    "text/plain; charset=utf-8".to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", SHOPPING_LIST_FILENAME),
                ),
            ],
            report.render(),
        )
            .into_response(),
        None => (
            StatusCode::NO_CONTENT,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            EMPTY_SHOPPING_LIST_MESSAGE,
        )
            .into_response(),
    };

    Ok(response)
}

// =============================================================================
// SHORT LINKS
// =============================================================================

/// Get (creating on first request) the short link of a recipe
#[utoipa::path(
    get,
    path = "/api/recipes/{id}/get-link",
    tag = "Recipes",
    operation_id = "getRecipeShortLink",
    params(
        ("id" = i64, Path, description = "Recipe ID", example = 42)
    ),
    responses(
        (status = 200, description = "Absolute short URL", body = ShortLinkResponse),
        (status = 404, description = "Recipe not found"),
        (status = 503, description = "No free short code could be allocated")
    )
)]
pub async fn get_short_link(
    State(state): State<AppState>,
    Path(recipe_id): Path<i64>,
) -> Result<Json<ShortLinkResponse>, ServiceError> {
    let service = ShortLinkService::new(&state);
    let link = service.get_or_create_short_link(recipe_id).await?;

    Ok(Json(ShortLinkResponse {
        short_link: service.absolute_short_url(&link),
    }))
}

// =============================================================================
// SHOPPING CART AND FAVORITES
// =============================================================================

async fn add_to_list(
    state: &AppState,
    list: RecipeList,
    auth_user: AuthenticatedUser,
    recipe_id: i64,
) -> Result<(StatusCode, Json<RecipeSummary>), ServiceError> {
    let summary = MembershipService::new(state)
        .add(list, auth_user.user_id, recipe_id)
        .await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

async fn remove_from_list(
    state: &AppState,
    list: RecipeList,
    auth_user: AuthenticatedUser,
    recipe_id: i64,
) -> Result<StatusCode, ServiceError> {
    MembershipService::new(state)
        .remove(list, auth_user.user_id, recipe_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a recipe to the shopping cart
#[utoipa::path(
    post,
    path = "/api/recipes/{id}/shopping_cart",
    tag = "Recipes",
    operation_id = "addToShoppingCart",
    params(("id" = i64, Path, description = "Recipe ID")),
    responses(
        (status = 201, description = "Recipe added", body = RecipeSummary),
        (status = 400, description = "Recipe is already in the shopping cart"),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_to_shopping_cart(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(recipe_id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeSummary>), ServiceError> {
    add_to_list(&state, RecipeList::ShoppingCart, auth_user, recipe_id).await
}

/// Remove a recipe from the shopping cart
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/shopping_cart",
    tag = "Recipes",
    operation_id = "removeFromShoppingCart",
    params(("id" = i64, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe removed"),
        (status = 400, description = "Recipe is not in the shopping cart"),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_from_shopping_cart(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(recipe_id): Path<i64>,
) -> Result<StatusCode, ServiceError> {
    remove_from_list(&state, RecipeList::ShoppingCart, auth_user, recipe_id).await
}

/// Add a recipe to favorites
#[utoipa::path(
    post,
    path = "/api/recipes/{id}/favorite",
    tag = "Recipes",
    operation_id = "addToFavorites",
    params(("id" = i64, Path, description = "Recipe ID")),
    responses(
        (status = 201, description = "Recipe added", body = RecipeSummary),
        (status = 400, description = "Recipe is already in favorites"),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_to_favorites(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(recipe_id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeSummary>), ServiceError> {
    add_to_list(&state, RecipeList::Favorites, auth_user, recipe_id).await
}

/// Remove a recipe from favorites
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/favorite",
    tag = "Recipes",
    operation_id = "removeFromFavorites",
    params(("id" = i64, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe removed"),
        (status = 400, description = "Recipe is not in favorites"),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_from_favorites(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(recipe_id): Path<i64>,
) -> Result<StatusCode, ServiceError> {
    remove_from_list(&state, RecipeList::Favorites, auth_user, recipe_id).await
}
