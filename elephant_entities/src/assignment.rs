use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::{error::RosterError, store::RosterStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    pub assigned: usize,
}

/// Uniformly random ordering of `1..=count`.
pub fn random_permutation<R>(count: usize, rng: &mut R) -> Vec<u32> where R: Rng + ?Sized {
    let mut numbers: Vec<u32> = (1..=count as u32).collect();
    numbers.shuffle(rng);
    numbers
}

/// Gives every participant currently in the store a distinct number in `1..=N`.
///
/// Existing numbers are overwritten unconditionally.
pub async fn assign_numbers<S>(store: &S) -> Result<AssignmentOutcome, RosterError> where S: RosterStore + ?Sized {
    let mut rng = StdRng::from_entropy();
    assign_numbers_with_rng(store, &mut rng).await
}

pub async fn assign_numbers_with_rng<S, R>(store: &S, rng: &mut R) -> Result<AssignmentOutcome, RosterError> where S: RosterStore + ?Sized, R: Rng + Send + ?Sized {
    let count = store.count().await?;
    if count == 0 {
        return Err(RosterError::EmptyRoster);
    }

    let numbers = random_permutation(count, rng);
    store.write_numbers(&numbers).await?;

    info!("Assigned numbers to {} participants using the {} store", count, store.name());
    Ok(AssignmentOutcome { assigned: count })
}
