use async_trait::async_trait;
use elephant_entities::prelude::*;
use serde::{Serialize, Deserialize};

use super::ActionTrait;


#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClearRosterAction {}

#[async_trait]
impl ActionTrait for ClearRosterAction {
    async fn execute<S>(self, store: &S) -> Result<String, RosterError> where S: RosterStore + ?Sized {
        store.clear().await?;
        Ok("Roster cleared".into())
    }
}
