use async_trait::async_trait;
use elephant_entities::prelude::*;


#[async_trait]
pub trait ActionTrait {
    /// Applies the action and returns a human-readable summary of what changed.
    async fn execute<S>(self, store: &S) -> Result<String, RosterError> where S: RosterStore + ?Sized;
}
