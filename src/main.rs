//! Binary entry point for the course library API

use std::sync::Arc;

use anyhow::Result;

use course_library::auth::TokenStore;
use course_library::config::AppConfig;
use course_library::core::SystemClock;
use course_library::hateoas::ApiRoutes;
use course_library::server::{self, AppState};
use course_library::service::{CourseLibraryService, UserService};
use course_library::storage::InMemoryStore;

/// Environment variable naming the YAML configuration file
const CONFIG_ENV_VAR: &str = "COURSE_LIBRARY_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) => {
            tracing::info!("Loading configuration from {}", path);
            AppConfig::from_yaml_file(&path)?
        }
        Err(_) => {
            tracing::info!("No {} set, using default configuration", CONFIG_ENV_VAR);
            AppConfig::default()
        }
    };

    let store = InMemoryStore::default();
    for seed in &config.seed_users {
        store.seed_user(&seed.email, &seed.password)?;
    }
    if config.seed_users.is_empty() {
        tracing::warn!("No seed users configured; every login will be refused");
    }

    let clock = Arc::new(SystemClock);
    let repo = Arc::new(store);
    let state = AppState {
        library: CourseLibraryService::new(repo.clone(), repo.clone()),
        users: UserService::new(repo),
        tokens: TokenStore::new(clock.clone(), config.token_ttl_seconds),
        routes: Arc::new(ApiRoutes::new()),
        clock,
    };

    server::serve(&config.bind_address(), state).await
}
