use async_trait::async_trait;
use elephant_entities::prelude::*;
use serde::{Serialize, Deserialize};

use super::ActionTrait;


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddParticipantAction {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[async_trait]
impl ActionTrait for AddParticipantAction {
    async fn execute<S>(self, store: &S) -> Result<String, RosterError> where S: RosterStore + ?Sized {
        let participant = store.add(&self.name, &self.email).await?;
        if participant.email.is_empty() {
            Ok(format!("Added {} to the roster", participant.display_name()))
        }
        else {
            Ok(format!("Added {} with email {} to the roster", participant.display_name(), participant.email))
        }
    }
}
