// Library exports for the recipe backend
// The binary and the integration tests both build on these modules

pub mod app;
pub mod app_config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod schema;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use app::{build_router, AppState};
pub use app_config::{AppConfig, CONFIG};
pub use db::{DieselPool, PgRepository, Repository};
pub use middleware::{auth_middleware, AuthenticatedUser};
pub use models::auth::AccessTokenClaims;
pub use services::{
    JwtError, JwtService, RecipeUrlBuilder, ShoppingListAggregator, ShortCodeError,
    ShortCodeGenerator, ShortLinkService,
};
pub use utils::service_error::ServiceError;

/// Initialize the application state from configuration: database pool,
/// embedded migrations and services.
pub async fn initialize_app_state(
    config: &AppConfig,
) -> Result<AppState, Box<dyn std::error::Error + Send + Sync>> {
    use std::sync::Arc;
    use tracing::info;

    info!("Initializing database pool...");
    let db_config = db::DieselDatabaseConfig::from(config);
    info!(
        "Database URL: {}",
        db::mask_connection_string(&db_config.url)
    );
    let diesel_pool = db::create_diesel_pool(db_config).await?;

    if migrations::should_run_migrations(config) {
        info!("Running embedded migrations...");
        migrations::run_all_migrations(migrations::MigrationConfig::from(config)).await?;
    } else {
        info!("Embedded migrations disabled");
    }

    let repository: Arc<dyn Repository> = Arc::new(PgRepository::new(diesel_pool));
    let short_code_generator = ShortCodeGenerator::from_config(config)?;

    Ok(AppState::new(
        repository,
        JwtService::from_config(config),
        short_code_generator,
        RecipeUrlBuilder::new(config.public_base_url.clone()),
    ))
}
