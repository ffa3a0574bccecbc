#![allow(dead_code)]

use elephant_entities::{prelude::*, mock};
use migration::MigratorTrait;
use sea_orm::{prelude::*, Database};


pub async fn set_up_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn set_up_sqlite_store(with_mock_roster: bool) -> Result<SqliteRosterStore, RosterError> {
    let store = SqliteRosterStore::new(set_up_db().await?);
    if with_mock_roster {
        store.replace_all(&mock::make_mock_roster()).await?;
    }
    Ok(store)
}

pub async fn set_up_csv_store(dir: &tempfile::TempDir, with_mock_roster: bool) -> Result<CsvRosterStore, RosterError> {
    let store = CsvRosterStore::new(dir.path().join("roster.csv"));
    if with_mock_roster {
        store.replace_all(&mock::make_mock_roster()).await?;
    }
    Ok(store)
}

pub fn assert_is_permutation(participants: &[Participant]) {
    let mut numbers = participants.iter().map(|p| p.number.assigned().expect("number should be assigned")).collect::<Vec<_>>();
    numbers.sort();
    assert_eq!(numbers, (1..=participants.len() as u32).collect::<Vec<_>>());
}

/// Runs the same scenario against a fresh SQLite store and a fresh CSV store.
pub async fn for_each_backend<F, Fut>(scenario: F) -> Result<(), RosterError>
where
    F: Fn(Box<dyn RosterStore>) -> Fut,
    Fut: std::future::Future<Output = Result<(), RosterError>>,
{
    scenario(Box::new(set_up_sqlite_store(false).await?)).await?;

    let dir = tempfile::tempdir()?;
    scenario(Box::new(set_up_csv_store(&dir, false).await?)).await?;
    Ok(())
}
