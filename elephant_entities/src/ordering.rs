use serde::{Serialize, Deserialize};
use tracing::warn;

use crate::{assignment::assign_numbers, domain::{Participant, TurnNumber}, error::{InvalidNumbering, RosterError}, store::RosterStore};

/// Checks that the stored numbers form exactly `1..=N` for `N` participants.
///
/// Returns the first problem found in storage order.
pub fn check_numbering(participants: &[Participant]) -> Result<(), InvalidNumbering> {
    let count = participants.len();
    let mut seen = vec![false; count];

    for (position, participant) in participants.iter().enumerate() {
        let number = match &participant.number {
            TurnNumber::Unset => return Err(InvalidNumbering::Missing { position }),
            TurnNumber::Invalid(raw) => return Err(InvalidNumbering::NotAPositiveInteger { position, raw: raw.clone() }),
            TurnNumber::Assigned(number) => *number,
        };

        let idx = number as usize;
        if idx == 0 || idx > count {
            return Err(InvalidNumbering::OutOfRange { position, number, count });
        }
        if seen[idx - 1] {
            return Err(InvalidNumbering::Duplicate { number });
        }
        seen[idx - 1] = true;
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedParticipant {
    pub number: u32,
    pub name: String,
    pub email: String,
}

/// A participant together with whoever goes after them.
/// The last participant is followed by the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn<'a> {
    pub current: &'a OrderedParticipant,
    pub next: &'a OrderedParticipant,
}

/// Participants sorted ascending by their turn number. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedRoster {
    participants: Vec<OrderedParticipant>,
}

impl OrderedRoster {
    pub fn from_participants(participants: Vec<Participant>) -> Result<OrderedRoster, RosterError> {
        if participants.is_empty() {
            return Err(RosterError::EmptyRoster);
        }
        check_numbering(&participants)?;

        let mut ordered = participants.into_iter().filter_map(|p| {
            p.number.assigned().map(|number| OrderedParticipant {
                number,
                name: p.name.unwrap_or_default(),
                email: p.email,
            })
        }).collect::<Vec<_>>();
        ordered.sort_by_key(|p| p.number);

        Ok(OrderedRoster { participants: ordered })
    }

    /// Lowest-numbered participant.
    pub fn first(&self) -> &OrderedParticipant {
        &self.participants[0]
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrderedParticipant> {
        self.participants.iter()
    }

    pub fn turns(&self) -> impl Iterator<Item = Turn<'_>> {
        let count = self.participants.len();
        self.participants.iter().enumerate().map(move |(idx, current)| Turn {
            current,
            next: &self.participants[(idx + 1) % count],
        })
    }

    pub fn into_inner(self) -> Vec<OrderedParticipant> {
        self.participants
    }
}

impl<'a> IntoIterator for &'a OrderedRoster {
    type Item = &'a OrderedParticipant;
    type IntoIter = std::slice::Iter<'a, OrderedParticipant>;

    fn into_iter(self) -> Self::IntoIter {
        self.participants.iter()
    }
}

/// Loads the roster sorted by number, reassigning all numbers first if the
/// stored ones are incomplete or inconsistent.
pub async fn ordered_roster<S>(store: &S) -> Result<OrderedRoster, RosterError> where S: RosterStore + ?Sized {
    let participants = store.list_all().await?;
    if participants.is_empty() {
        return Err(RosterError::EmptyRoster);
    }

    if let Err(reason) = check_numbering(&participants) {
        warn!("Stored numbers are invalid ({}), reassigning", reason);
        assign_numbers(store).await?;
        let participants = store.list_all().await?;
        return OrderedRoster::from_participants(participants);
    }

    OrderedRoster::from_participants(participants)
}
