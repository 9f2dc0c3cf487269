// PostgreSQL repository on top of diesel-async and the bb8 pool

use async_trait::async_trait;
use bb8::PooledConnection;
use diesel::prelude::*;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    db::{
        check_diesel_health, DbError, DieselPool, IngredientRepository, InsertOutcome,
        MembershipRepository, Repository, ShoppingCartRepository, ShortLinkRepository,
    },
    models::{CartIngredient, Ingredient, NewShortLink, RecipeList, RecipeSummary, ShortLink},
    schema::{favorites, ingredients, recipe_ingredients, recipes, shopping_cart, short_links},
};

type PgConn<'a> = PooledConnection<'a, AsyncDieselConnectionManager<AsyncPgConnection>>;

#[derive(Clone)]
pub struct PgRepository {
    pool: DieselPool,
}

impl PgRepository {
    pub fn new(pool: DieselPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> Result<PgConn<'_>, DbError> {
        self.pool
            .get()
            .await
            .map_err(|e| DbError::Pool(e.to_string()))
    }
}

/// Escape LIKE wildcards so a user-supplied prefix matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl ShortLinkRepository for PgRepository {
    async fn recipe_exists(&self, recipe_id: i64) -> Result<bool, DbError> {
        let mut conn = self.conn().await?;

        let exists = diesel::select(diesel::dsl::exists(recipes::table.find(recipe_id)))
            .get_result::<bool>(&mut conn)
            .await?;

        Ok(exists)
    }

    async fn code_exists(&self, code: &str) -> Result<bool, DbError> {
        let mut conn = self.conn().await?;

        let exists = diesel::select(diesel::dsl::exists(
            short_links::table.filter(short_links::short_code.eq(code)),
        ))
        .get_result::<bool>(&mut conn)
        .await?;

        Ok(exists)
    }

    async fn find_by_recipe(&self, recipe_id: i64) -> Result<Option<ShortLink>, DbError> {
        let mut conn = self.conn().await?;

        let link = short_links::table
            .filter(short_links::recipe_id.eq(recipe_id))
            .select(ShortLink::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, DbError> {
        let mut conn = self.conn().await?;

        let link = short_links::table
            .filter(short_links::short_code.eq(code))
            .select(ShortLink::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(link)
    }

    #[instrument(skip(self), fields(recipe_id = link.recipe_id, code = %link.short_code))]
    async fn insert_or_fetch(&self, link: NewShortLink) -> Result<InsertOutcome, DbError> {
        let mut conn = self.conn().await?;

        // ON CONFLICT DO NOTHING covers both unique keys (recipe_id and short_code)
        let inserted = diesel::insert_into(short_links::table)
            .values(&link)
            .on_conflict_do_nothing()
            .returning(ShortLink::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?;

        if let Some(created) = inserted {
            return Ok(InsertOutcome::Inserted(created));
        }

        let existing = short_links::table
            .filter(short_links::recipe_id.eq(link.recipe_id))
            .select(ShortLink::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(match existing {
            Some(existing) => InsertOutcome::Existing(existing),
            None => InsertOutcome::CodeTaken,
        })
    }
}

#[async_trait]
impl ShoppingCartRepository for PgRepository {
    async fn cart_ingredients(&self, user_id: Uuid) -> Result<Vec<CartIngredient>, DbError> {
        let mut conn = self.conn().await?;

        let rows = recipe_ingredients::table
            .inner_join(ingredients::table)
            .inner_join(
                shopping_cart::table.on(shopping_cart::recipe_id.eq(recipe_ingredients::recipe_id)),
            )
            .filter(shopping_cart::user_id.eq(user_id))
            .select((
                ingredients::name,
                ingredients::measurement_unit,
                recipe_ingredients::amount,
            ))
            .load::<CartIngredient>(&mut conn)
            .await?;

        Ok(rows)
    }
}

#[async_trait]
impl MembershipRepository for PgRepository {
    async fn recipe_summary(&self, recipe_id: i64) -> Result<Option<RecipeSummary>, DbError> {
        let mut conn = self.conn().await?;

        let summary = recipes::table
            .find(recipe_id)
            .select(RecipeSummary::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(summary)
    }

    async fn add_member(
        &self,
        list: RecipeList,
        user_id: Uuid,
        recipe_id: i64,
    ) -> Result<bool, DbError> {
        let mut conn = self.conn().await?;

        let inserted = match list {
            RecipeList::ShoppingCart => {
                diesel::insert_into(shopping_cart::table)
                    .values((
                        shopping_cart::user_id.eq(user_id),
                        shopping_cart::recipe_id.eq(recipe_id),
                    ))
                    .on_conflict_do_nothing()
                    .execute(&mut conn)
                    .await?
            },
            RecipeList::Favorites => {
                diesel::insert_into(favorites::table)
                    .values((
                        favorites::user_id.eq(user_id),
                        favorites::recipe_id.eq(recipe_id),
                    ))
                    .on_conflict_do_nothing()
                    .execute(&mut conn)
                    .await?
            },
        };

        Ok(inserted > 0)
    }

    async fn remove_member(
        &self,
        list: RecipeList,
        user_id: Uuid,
        recipe_id: i64,
    ) -> Result<bool, DbError> {
        let mut conn = self.conn().await?;

        let deleted = match list {
            RecipeList::ShoppingCart => {
                diesel::delete(
                    shopping_cart::table
                        .filter(shopping_cart::user_id.eq(user_id))
                        .filter(shopping_cart::recipe_id.eq(recipe_id)),
                )
                .execute(&mut conn)
                .await?
            },
            RecipeList::Favorites => {
                diesel::delete(
                    favorites::table
                        .filter(favorites::user_id.eq(user_id))
                        .filter(favorites::recipe_id.eq(recipe_id)),
                )
                .execute(&mut conn)
                .await?
            },
        };

        Ok(deleted > 0)
    }
}

#[async_trait]
impl IngredientRepository for PgRepository {
    async fn search_ingredients(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, DbError> {
        let mut conn = self.conn().await?;

        let mut query = ingredients::table
            .select(Ingredient::as_select())
            .into_boxed();

        if let Some(prefix) = name_prefix {
            query = query.filter(ingredients::name.ilike(format!("{}%", escape_like(prefix))));
        }

        let found = query
            .order((ingredients::name.asc(), ingredients::measurement_unit.asc()))
            .load(&mut conn)
            .await?;

        Ok(found)
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn ping(&self) -> Result<(), DbError> {
        check_diesel_health(&self.pool).await
    }
}
