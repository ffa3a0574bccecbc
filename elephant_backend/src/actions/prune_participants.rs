use async_trait::async_trait;
use elephant_entities::prelude::*;
use serde::{Serialize, Deserialize};

use super::ActionTrait;


#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PruneParticipantsAction {}

#[async_trait]
impl ActionTrait for PruneParticipantsAction {
    async fn execute<S>(self, store: &S) -> Result<String, RosterError> where S: RosterStore + ?Sized {
        if store.count().await? == 0 {
            return Err(RosterError::EmptyRoster);
        }
        let removed = store.prune().await?;
        Ok(format!("Participants pruned, removed {} empty entries", removed))
    }
}
