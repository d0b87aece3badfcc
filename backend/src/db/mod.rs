//! Database module for itinerary and place storage.
//!
//! Storage backends sit behind the repository traits so they can be swapped
//! without touching the HTTP layer.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers / client-facing services                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (crate::services) - validation, places   │
//! │  API orchestration, date lists                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                         │
//! │  - ItineraryRepository                                   │
//! │  - PlaceRepository                                       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                 │
//! ┌───▼──────────────┐     ┌──────────▼──────────────┐
//! │ Postgres (Diesel)│     │ Local Repository        │
//! │ postgres-repo    │     │ (in-memory)             │
//! └──────────────────┘     └─────────────────────────┘
//! ```

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    ErrorContext, FullRepository, ItineraryRepository, PlaceRepository, RepositoryError,
    RepositoryResult,
};

use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Create the repository the process should use.
///
/// A `repository.toml` in one of the standard locations wins; otherwise the
/// backend is chosen from `REPOSITORY_TYPE` / `DATABASE_URL`.
pub async fn init_repository() -> RepositoryResult<Arc<dyn FullRepository>> {
    init_repository_from(&repo_config::default_search_paths()).await
}

/// Same as [`init_repository`], looking for the config file in `search_paths`.
///
/// An invalid config file is returned as an error instead of falling back
/// to the environment.
pub async fn init_repository_from(
    search_paths: &[PathBuf],
) -> RepositoryResult<Arc<dyn FullRepository>> {
    match RepositoryConfig::from_search_paths(search_paths)? {
        Some(config) => {
            info!(
                "Using repository.toml (type={})",
                config.repository.repo_type
            );
            RepositoryFactory::from_repository_config(&config).await
        }
        None => {
            let repo_type = RepositoryType::from_env();
            info!("Using {:?} repository from environment", repo_type);
            RepositoryFactory::from_env().await
        }
    }
}
