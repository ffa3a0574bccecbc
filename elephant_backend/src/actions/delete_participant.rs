use async_trait::async_trait;
use elephant_entities::prelude::*;
use serde::{Serialize, Deserialize};

use super::ActionTrait;


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteParticipantAction {
    pub name: String,
}

#[async_trait]
impl ActionTrait for DeleteParticipantAction {
    async fn execute<S>(self, store: &S) -> Result<String, RosterError> where S: RosterStore + ?Sized {
        let removed = store.delete_by_name(&self.name).await?;
        match removed {
            0 => Ok(format!("No participant named {} found", self.name)),
            1 => Ok(format!("Deleted {} from the roster", self.name)),
            n => Ok(format!("Deleted {} participants named {} from the roster", n, self.name)),
        }
    }
}
