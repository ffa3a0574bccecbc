use serde::{Serialize, Deserialize};

use elephant_entities::prelude::*;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrderView {
    pub entries: Vec<TurnOrderEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrderEntry {
    pub number: u32,
    pub name: String,
    pub next: String,
}

impl TurnOrderView {
    /// Reassigns numbers first if the stored ones are unusable.
    pub async fn load<S>(store: &S) -> Result<TurnOrderView, RosterError> where S: RosterStore + ?Sized {
        let roster = ordered_roster(store).await?;
        Ok(TurnOrderView::from_roster(&roster))
    }

    pub fn from_roster(roster: &OrderedRoster) -> TurnOrderView {
        let entries = roster.turns().map(|turn| TurnOrderEntry {
            number: turn.current.number,
            name: turn.current.name.clone(),
            next: turn.next.name.clone(),
        }).collect();

        TurnOrderView { entries }
    }

    pub fn render_lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| format!("{}: {}", e.number, e.name)).collect()
    }
}
