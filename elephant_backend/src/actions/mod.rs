use elephant_entities::prelude::*;

use serde::{Serialize, Deserialize};

mod base;
mod add_participant;
mod delete_participant;
mod prune_participants;
mod clear_roster;
mod assign_numbers;
mod upload_participants_list;

pub use self::base::ActionTrait;
pub use self::add_participant::AddParticipantAction;
pub use self::delete_participant::DeleteParticipantAction;
pub use self::prune_participants::PruneParticipantsAction;
pub use self::clear_roster::ClearRosterAction;
pub use self::assign_numbers::AssignNumbersAction;
pub use self::upload_participants_list::UploadParticipantsListAction;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    AddParticipant { action: AddParticipantAction },
    DeleteParticipant { action: DeleteParticipantAction },
    PruneParticipants { action: PruneParticipantsAction },
    ClearRoster { action: ClearRosterAction },
    AssignNumbers { action: AssignNumbersAction },
    UploadParticipantsList { action: UploadParticipantsListAction },
}

impl Action {
    pub async fn execute<S>(self, store: &S) -> Result<String, RosterError> where S: RosterStore + ?Sized {
        match self {
            Action::AddParticipant { action } => action.execute(store).await,
            Action::DeleteParticipant { action } => action.execute(store).await,
            Action::PruneParticipants { action } => action.execute(store).await,
            Action::ClearRoster { action } => action.execute(store).await,
            Action::AssignNumbers { action } => action.execute(store).await,
            Action::UploadParticipantsList { action } => action.execute(store).await,
        }
    }

    /// Like `execute`, but reports rejected input and empty rosters as an
    /// unsuccessful response instead of an error. Storage failures still
    /// propagate.
    pub async fn run<S>(self, store: &S) -> Result<ActionResponse, RosterError> where S: RosterStore + ?Sized {
        match self.execute(store).await {
            Ok(message) => Ok(ActionResponse { success: true, message: Some(message) }),
            Err(e) if !e.is_fatal() => Ok(ActionResponse { success: false, message: Some(e.to_string()) }),
            Err(e) => Err(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: Option<String>,
}
