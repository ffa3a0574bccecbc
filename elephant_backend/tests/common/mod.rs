#![allow(dead_code)]

use elephant_entities::{prelude::*, mock};


pub async fn set_up_store(with_mock_roster: bool) -> Result<SqliteRosterStore, RosterError> {
    let store = SqliteRosterStore::connect("sqlite::memory:").await?;
    if with_mock_roster {
        store.replace_all(&mock::make_mock_roster()).await?;
    }
    Ok(store)
}
