use async_trait::async_trait;
use elephant_entities::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Serialize, Deserialize};

use super::ActionTrait;


#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignNumbersAction {
    /// Fixed seed for a reproducible draw.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[async_trait]
impl ActionTrait for AssignNumbersAction {
    async fn execute<S>(self, store: &S) -> Result<String, RosterError> where S: RosterStore + ?Sized {
        let outcome = match self.seed {
            Some(seed) => assign_numbers_with_rng(store, &mut StdRng::seed_from_u64(seed)).await?,
            None => assign_numbers(store).await?,
        };
        Ok(format!("Numbers assigned to {} participants", outcome.assigned))
    }
}
