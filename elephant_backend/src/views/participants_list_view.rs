use serde::{Serialize, Deserialize};

use elephant_entities::prelude::*;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantsListView {
    pub entries: Vec<ParticipantEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantEntry {
    pub name: String,
    pub email: String,
}

impl ParticipantsListView {
    /// Loads every participant in storage order. Fails with `EmptyRoster`
    /// if there is nothing to show.
    pub async fn load<S>(store: &S) -> Result<ParticipantsListView, RosterError> where S: RosterStore + ?Sized {
        let participants = store.list_all().await?;
        if participants.is_empty() {
            return Err(RosterError::EmptyRoster);
        }

        let entries = participants.into_iter().map(|p| ParticipantEntry {
            name: p.name.unwrap_or_default(),
            email: p.email,
        }).collect();

        Ok(ParticipantsListView { entries })
    }

    pub fn render_lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| format!("{} | {}", e.name, e.email)).collect()
    }
}
