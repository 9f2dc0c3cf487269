// Shopping cart and favorites membership

use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    app::AppState,
    db::Repository,
    models::{RecipeList, RecipeSummary},
    utils::service_error::ServiceError,
};

pub struct MembershipService {
    repository: Arc<dyn Repository>,
}

impl MembershipService {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.repository.clone(),
        }
    }

    /// Add a recipe to one of the user's lists and echo back its summary
    #[instrument(skip(self))]
    pub async fn add(
        &self,
        list: RecipeList,
        user_id: Uuid,
        recipe_id: i64,
    ) -> Result<RecipeSummary, ServiceError> {
        let summary = self
            .repository
            .recipe_summary(recipe_id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        if !self.repository.add_member(list, user_id, recipe_id).await? {
            return Err(ServiceError::ValidationError(format!(
                "Recipe is already in {}",
                list
            )));
        }

        info!("Recipe {} added to {} of user {}", recipe_id, list, user_id);
        Ok(summary)
    }

    #[instrument(skip(self))]
    pub async fn remove(
        &self,
        list: RecipeList,
        user_id: Uuid,
        recipe_id: i64,
    ) -> Result<(), ServiceError> {
        if self.repository.recipe_summary(recipe_id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }

        if !self
            .repository
            .remove_member(list, user_id, recipe_id)
            .await?
        {
            return Err(ServiceError::ValidationError(format!(
                "Recipe is not in {}",
                list
            )));
        }

        info!(
            "Recipe {} removed from {} of user {}",
            recipe_id, list, user_id
        );
        Ok(())
    }
}
