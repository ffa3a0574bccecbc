mod participants_list_view;
mod turn_order_view;

pub use self::participants_list_view::{ParticipantsListView, ParticipantEntry};
pub use self::turn_order_view::{TurnOrderView, TurnOrderEntry};

use elephant_entities::prelude::*;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type")]
pub enum View {
    ParticipantsList,
    TurnOrder,
}

impl View {
    pub async fn load_json<S>(&self, store: &S) -> Result<String, anyhow::Error> where S: RosterStore + ?Sized {
        Ok(match self {
            View::ParticipantsList => serde_json::to_string(&ParticipantsListView::load(store).await?)?,
            View::TurnOrder => serde_json::to_string(&TurnOrderView::load(store).await?)?,
        })
    }

    /// Plain-text rendering, one line per participant.
    pub async fn load_lines<S>(&self, store: &S) -> Result<Vec<String>, RosterError> where S: RosterStore + ?Sized {
        Ok(match self {
            View::ParticipantsList => ParticipantsListView::load(store).await?.render_lines(),
            View::TurnOrder => TurnOrderView::load(store).await?.render_lines(),
        })
    }
}
