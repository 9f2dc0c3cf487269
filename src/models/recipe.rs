// Recipe-side models: ingredients, cart rows and recipe summaries

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::schema::{ingredients, recipes};

// =============================================================================
// DATABASE MODELS
// =============================================================================

/// Ingredient identified by its (name, measurement_unit) pair
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[schema(example = json!({"id": 1, "name": "Salt", "measurement_unit": "g"}))]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

/// One ingredient line of one recipe in a user's shopping cart
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct CartIngredient {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl CartIngredient {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>, amount: i32) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        }
    }
}

/// Short representation of a recipe, echoed back by the cart and favorite endpoints
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[schema(example = json!({"id": 42, "name": "Borscht", "cooking_time": 90}))]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub cooking_time: i32,
}

// =============================================================================
// MEMBERSHIP LISTS
// =============================================================================

/// Per-user recipe lists with membership-only semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeList {
    ShoppingCart,
    Favorites,
}

impl RecipeList {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeList::ShoppingCart => "shopping cart",
            RecipeList::Favorites => "favorites",
        }
    }
}

impl std::fmt::Display for RecipeList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// REQUEST DTOs
// =============================================================================

/// Query parameters for ingredient search
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IngredientSearchParams {
    /// Case-insensitive name prefix
    #[validate(length(max = 128, message = "Name filter must be at most 128 characters"))]
    pub name: Option<String>,
}

impl IngredientSearchParams {
    /// Prefix exactly as given; an empty value means no filter
    pub fn prefix(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }
}
