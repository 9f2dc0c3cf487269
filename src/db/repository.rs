// Repository seams between the services and the relational store

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    CartIngredient, Ingredient, NewShortLink, RecipeList, RecipeSummary, ShortLink,
};

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query error: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Result of an atomic insert-or-fetch of a short link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The new row was written
    Inserted(ShortLink),
    /// The recipe already had a link; it is returned unchanged
    Existing(ShortLink),
    /// Another recipe holds the code; nothing was written
    CodeTaken,
}

#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    async fn recipe_exists(&self, recipe_id: i64) -> Result<bool, DbError>;

    async fn code_exists(&self, code: &str) -> Result<bool, DbError>;

    async fn find_by_recipe(&self, recipe_id: i64) -> Result<Option<ShortLink>, DbError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, DbError>;

    /// Insert the link unless the recipe or the code is already taken.
    /// Must be a single atomic statement.
    async fn insert_or_fetch(&self, link: NewShortLink) -> Result<InsertOutcome, DbError>;
}

#[async_trait]
pub trait ShoppingCartRepository: Send + Sync {
    /// Every ingredient line of every recipe in the user's cart, unaggregated
    async fn cart_ingredients(&self, user_id: Uuid) -> Result<Vec<CartIngredient>, DbError>;
}

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn recipe_summary(&self, recipe_id: i64) -> Result<Option<RecipeSummary>, DbError>;

    /// Returns false when the recipe was already in the list
    async fn add_member(
        &self,
        list: RecipeList,
        user_id: Uuid,
        recipe_id: i64,
    ) -> Result<bool, DbError>;

    /// Returns false when the recipe was not in the list
    async fn remove_member(
        &self,
        list: RecipeList,
        user_id: Uuid,
        recipe_id: i64,
    ) -> Result<bool, DbError>;
}

#[async_trait]
pub trait IngredientRepository: Send + Sync {
    async fn search_ingredients(&self, name_prefix: Option<&str>)
        -> Result<Vec<Ingredient>, DbError>;
}

/// Everything the HTTP layer needs from the store
#[async_trait]
pub trait Repository:
    ShortLinkRepository + ShoppingCartRepository + MembershipRepository + IngredientRepository
{
    async fn ping(&self) -> Result<(), DbError>;
}
