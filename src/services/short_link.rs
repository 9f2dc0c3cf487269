// Lazily created, permanent short links for recipes

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::{
    app::AppState,
    db::{InsertOutcome, Repository},
    models::{NewShortLink, ShortLink},
    services::short_code::ShortCodeGenerator,
    utils::{code_alphabet, service_error::ServiceError},
};

/// Builds the public URLs a short link points at and is served from
#[derive(Debug, Clone)]
pub struct RecipeUrlBuilder {
    base_url: String,
}

impl RecipeUrlBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the recipe page
    pub fn recipe_url(&self, recipe_id: i64) -> String {
        format!("{}/recipes/{}/", self.base_url, recipe_id)
    }

    /// Short path stored alongside the code
    pub fn short_path(&self, code: &str) -> String {
        format!("/s/{}", code)
    }

    /// Absolute URL for a stored path
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub struct ShortLinkService {
    repository: Arc<dyn Repository>,
    generator: Arc<ShortCodeGenerator>,
    url_builder: Arc<RecipeUrlBuilder>,
}

impl ShortLinkService {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.repository.clone(),
            generator: state.short_code_generator.clone(),
            url_builder: state.url_builder.clone(),
        }
    }

    /// Return the recipe's short link, creating it on first request.
    /// Never regenerates or mutates an existing link.
    #[instrument(skip(self))]
    pub async fn get_or_create_short_link(&self, recipe_id: i64) -> Result<ShortLink, ServiceError> {
        if !self.repository.recipe_exists(recipe_id).await? {
            return Err(ServiceError::NotFound);
        }

        if let Some(existing) = self.repository.find_by_recipe(recipe_id).await? {
            return Ok(existing);
        }

        let repository = self.repository.as_ref();
        let mut attempts = 0;
        loop {
            let code = self
                .generator
                .draw_unique(repository, self.generator.length(), &mut attempts)
                .await?;

            let new_link = NewShortLink {
                recipe_id,
                full_url: self.url_builder.recipe_url(recipe_id),
                short_url: self.url_builder.short_path(&code),
                short_code: code,
            };

            match self.repository.insert_or_fetch(new_link).await? {
                InsertOutcome::Inserted(link) => {
                    info!(
                        "Created short link {} for recipe {}",
                        link.short_code, recipe_id
                    );
                    return Ok(link);
                },
                InsertOutcome::Existing(link) => {
                    debug!(
                        "Recipe {} got its short link from a concurrent request",
                        recipe_id
                    );
                    return Ok(link);
                },
                InsertOutcome::CodeTaken => {
                    warn!(
                        "Short code taken between check and insert for recipe {} (attempt: {})",
                        recipe_id, attempts
                    );
                },
            }
        }
    }

    /// Look up a short link by its exact code
    #[instrument(skip(self))]
    pub async fn resolve(&self, code: &str) -> Result<ShortLink, ServiceError> {
        if !code_alphabet::is_valid_code(code) {
            return Err(ServiceError::NotFound);
        }

        self.repository
            .find_by_code(code)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    pub fn absolute_short_url(&self, link: &ShortLink) -> String {
        self.url_builder.absolute(&link.short_url)
    }
}
