//! Repository selection from strings, environment and config files.

mod support;

use std::io::Write;
use std::str::FromStr;

use shiori_rust::db::factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
use shiori_rust::db::{init_repository_from, RepositoryConfig, RepositoryError};

#[test]
fn test_repository_type_from_str() {
    assert_eq!(
        RepositoryType::from_str("POSTGRES").unwrap(),
        RepositoryType::Postgres
    );
    assert_eq!(RepositoryType::from_str("pg").unwrap(), RepositoryType::Postgres);
    assert_eq!(RepositoryType::from_str("Local").unwrap(), RepositoryType::Local);

    let err = RepositoryType::from_str("mysql").unwrap_err();
    assert!(err.contains("Unknown repository type"));
}

#[test]
fn test_repository_type_from_env_default() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[test]
fn test_repository_type_from_env_with_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("postgres://localhost/shiori")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres),
    );
}

#[test]
fn test_repository_type_explicit_wins_over_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("postgres://localhost/shiori")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[test]
fn test_repository_type_invalid_env_defaults_to_local() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("cassandra")),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[tokio::test]
async fn test_create_local_via_factory() {
    let repo = RepositoryFactory::create(RepositoryType::Local, None)
        .await
        .unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_local_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"local\"").unwrap();

    let repo = RepositoryFactory::from_config_file(file.path()).await.unwrap();
    let created = repo
        .insert_itinerary(support::kyoto_trip("a@example.jp"))
        .await
        .unwrap();
    assert_eq!(created.itinerary_id.value(), 1);
}

#[tokio::test]
async fn test_builder_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"local\"").unwrap();

    let repo = RepositoryBuilder::new()
        .from_config_file(file.path())
        .unwrap()
        .build()
        .await
        .unwrap();
    assert!(repo.list_places().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_type_in_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"sqlite\"").unwrap();

    let err = RepositoryFactory::from_config_file(file.path())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    assert!(err.message().contains("Invalid repository type"));
}

#[tokio::test]
async fn test_init_rejects_broken_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repository.toml");
    std::fs::write(&path, "[repository]\ntype = local\n").unwrap();

    let err = init_repository_from(&[path]).await.err().unwrap();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    assert!(err.message().contains("Failed to parse config file"));
}

#[tokio::test]
async fn test_init_rejects_unknown_type_in_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repository.toml");
    std::fs::write(&path, "[repository]\ntype = \"postgre\"\n").unwrap();

    let err = init_repository_from(&[path]).await.err().unwrap();
    assert!(err.message().contains("Invalid repository type"));
}

#[test]
fn test_init_without_config_file_uses_environment() {
    let dir = tempfile::tempdir().unwrap();
    let paths = [dir.path().join("repository.toml")];

    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("local"))], || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let repo = runtime.block_on(init_repository_from(&paths)).unwrap();
        assert!(runtime.block_on(repo.health_check()).unwrap());
    });
}

#[test]
fn test_config_missing_repository_table() {
    assert!(toml::from_str::<RepositoryConfig>("[postgres]\ndatabase_url = \"x\"").is_err());
}

#[cfg(feature = "postgres-repo")]
#[tokio::test]
async fn test_create_postgres_without_config_fails() {
    let err = RepositoryFactory::create(RepositoryType::Postgres, None)
        .await
        .err()
        .unwrap();
    assert!(err.to_string().contains("requires PostgresConfig"));
}

#[cfg(not(feature = "postgres-repo"))]
#[tokio::test]
async fn test_create_postgres_without_feature_fails() {
    let err = RepositoryFactory::create(RepositoryType::Postgres, None)
        .await
        .err()
        .unwrap();
    assert!(err.to_string().contains("feature not enabled"));
}
