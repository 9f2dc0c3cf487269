// Models module for the recipe backend

pub mod auth;
pub mod recipe;
pub mod short_link;

pub use auth::AccessTokenClaims;
pub use recipe::{
    CartIngredient, Ingredient, IngredientSearchParams, RecipeList, RecipeSummary,
};
pub use short_link::{NewShortLink, ShortLink, ShortLinkResponse};
