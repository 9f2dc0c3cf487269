// Migration orchestrator for the recipe backend
// Embedded in the application binary so deployments need no diesel CLI

pub mod diesel;

use std::error::Error;
use tracing::{error, info};

use crate::app_config::AppConfig;

/// Configuration for migration execution
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    pub database_url: String,
    pub environment: String,
}

impl From<&AppConfig> for MigrationConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            database_url: config.database_url.clone(),
            environment: config.environment.to_string(),
        }
    }
}

/// Run the embedded PostgreSQL migrations
pub async fn run_all_migrations(config: MigrationConfig) -> Result<usize, Box<dyn Error + Send + Sync>> {
    info!(
        "[MIGRATIONS] Starting migration process for environment: {}",
        config.environment
    );

    match diesel::run_migrations(config.database_url).await {
        Ok(0) => {
            info!("[MIGRATIONS] Diesel migrations up to date");
            Ok(0)
        },
        Ok(applied_count) => {
            info!("[MIGRATIONS] Applied {} Diesel migrations", applied_count);
            Ok(applied_count)
        },
        Err(e) => {
            error!("[MIGRATIONS] Diesel migration failed: {}", e);
            Err(format!("Diesel migration failed: {}", e).into())
        },
    }
}

/// Check if migrations should run on startup
pub fn should_run_migrations(config: &AppConfig) -> bool {
    !config.disable_embedded_migrations
}
