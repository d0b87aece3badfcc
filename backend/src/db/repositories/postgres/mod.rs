//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;
use tracing::warn;

use crate::api::{Itinerary, ItineraryId, NewItinerary, NewPlace, Place, PlaceIndex};
use crate::db::repository::{
    ErrorContext, ItineraryRepository, PlaceRepository, RepositoryError, RepositoryResult,
};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connection_timeout_sec: u64,
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    /// Returns an error if neither `DATABASE_URL` nor `PG_DATABASE_URL` is set.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
            max_retries: env_or("PG_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", defaults.retry_delay_ms),
        })
    }

    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool, config })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;
        Ok(())
    }

    /// Execute a database operation on the blocking pool, retrying retryable
    /// failures up to `max_retries` times with a doubling delay.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1)),
                        );
                        if attempt < max_retries {
                            warn!("Postgres connection attempt {} failed: {}", attempt + 1, err);
                            last_error = Some(err);
                            continue;
                        }
                        return Err(err);
                    }
                };

                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }

            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

fn not_found(operation: &str, entity: &str, id: i64) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("{} {} not found", capitalize(entity), id),
        ErrorContext::new(operation)
            .with_entity(entity)
            .with_entity_id(id),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn rows_to_places(rows: Vec<PlaceRow>) -> RepositoryResult<Vec<Place>> {
    rows.into_iter().map(Place::try_from).collect()
}

#[async_trait]
impl ItineraryRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn insert_itinerary(&self, itinerary: NewItinerary) -> RepositoryResult<Itinerary> {
        let row = NewItineraryRow::from(itinerary);
        self.with_conn(move |conn| {
            diesel::insert_into(itineraries::table)
                .values(&row)
                .returning(ItineraryRow::as_returning())
                .get_result::<ItineraryRow>(conn)
                .map(Itinerary::from)
                .map_err(|e| map_diesel_error(e).with_operation("insert_itinerary"))
        })
        .await
    }

    async fn get_itinerary(&self, itinerary_id: ItineraryId) -> RepositoryResult<Itinerary> {
        self.with_conn(move |conn| {
            itineraries::table
                .find(itinerary_id.0)
                .select(ItineraryRow::as_select())
                .first::<ItineraryRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(Itinerary::from)
                .ok_or_else(|| not_found("get_itinerary", "itinerary", itinerary_id.0))
        })
        .await
    }

    async fn list_itineraries(&self) -> RepositoryResult<Vec<Itinerary>> {
        self.with_conn(|conn| {
            let rows = itineraries::table
                .select(ItineraryRow::as_select())
                .order(itineraries::itinerary_id.asc())
                .load::<ItineraryRow>(conn)
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(Itinerary::from).collect())
        })
        .await
    }

    async fn list_itineraries_by_user(
        &self,
        user_email: &str,
    ) -> RepositoryResult<Vec<Itinerary>> {
        let user_email = user_email.to_string();
        self.with_conn(move |conn| {
            let rows = itineraries::table
                .filter(itineraries::user_email.eq(&user_email))
                .select(ItineraryRow::as_select())
                .order(itineraries::itinerary_id.asc())
                .load::<ItineraryRow>(conn)
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(Itinerary::from).collect())
        })
        .await
    }

    async fn delete_itinerary(&self, itinerary_id: ItineraryId) -> RepositoryResult<usize> {
        self.with_conn(move |conn| {
            conn.transaction::<usize, diesel::result::Error, _>(|tx| {
                diesel::delete(places::table.filter(places::itinerary_id.eq(itinerary_id.0)))
                    .execute(tx)?;
                diesel::delete(itineraries::table.find(itinerary_id.0)).execute(tx)
            })
            .map_err(|e| map_diesel_error(e).with_operation("delete_itinerary"))
        })
        .await
    }
}

#[async_trait]
impl PlaceRepository for PostgresRepository {
    async fn insert_place(&self, place: NewPlace) -> RepositoryResult<PlaceIndex> {
        let row = NewPlaceRow::try_from(place)?;
        self.with_conn(move |conn| {
            diesel::insert_into(places::table)
                .values(&row)
                .returning(places::place_index)
                .get_result::<i64>(conn)
                .map(PlaceIndex)
                .map_err(|e| map_diesel_error(e).with_operation("insert_place"))
        })
        .await
    }

    async fn get_place(&self, place_index: PlaceIndex) -> RepositoryResult<Place> {
        self.with_conn(move |conn| {
            let row = places::table
                .find(place_index.0)
                .select(PlaceRow::as_select())
                .first::<PlaceRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .ok_or_else(|| not_found("get_place", "place", place_index.0))?;
            Place::try_from(row)
        })
        .await
    }

    async fn list_places(&self) -> RepositoryResult<Vec<Place>> {
        self.with_conn(|conn| {
            let rows = places::table
                .select(PlaceRow::as_select())
                .order(places::place_index.asc())
                .load::<PlaceRow>(conn)
                .map_err(map_diesel_error)?;
            rows_to_places(rows)
        })
        .await
    }

    async fn list_places_for_itinerary(
        &self,
        itinerary_id: ItineraryId,
    ) -> RepositoryResult<Vec<Place>> {
        self.with_conn(move |conn| {
            let rows = places::table
                .filter(places::itinerary_id.eq(itinerary_id.0))
                .select(PlaceRow::as_select())
                .order(places::place_index.asc())
                .load::<PlaceRow>(conn)
                .map_err(map_diesel_error)?;
            rows_to_places(rows)
        })
        .await
    }

    async fn delete_place(&self, place_index: PlaceIndex) -> RepositoryResult<usize> {
        self.with_conn(move |conn| {
            diesel::delete(places::table.find(place_index.0))
                .execute(conn)
                .map_err(|e| map_diesel_error(e).with_operation("delete_place"))
        })
        .await
    }
}
