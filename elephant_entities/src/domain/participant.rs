use std::fmt::Display;

use sea_orm::ActiveValue;
use serde::{Serialize, Deserialize};

use crate::{error::RosterError, schema};

/// Stored state of a participant's turn number.
///
/// Stores can contain values this program never writes (hand-edited files,
/// rows from older versions), so anything that is not a positive integer is
/// kept as `Invalid` instead of failing the read.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Default)]
pub enum TurnNumber {
    #[default]
    Unset,
    Assigned(u32),
    Invalid(String),
}

impl TurnNumber {
    pub fn from_cell(raw: &str) -> TurnNumber {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return TurnNumber::Unset;
        }

        match trimmed.parse::<i64>() {
            Ok(value) => Self::from_integer(value),
            Err(_) => TurnNumber::Invalid(raw.to_string()),
        }
    }

    pub fn from_stored(value: Option<i64>) -> TurnNumber {
        match value {
            Some(value) => Self::from_integer(value),
            None => TurnNumber::Unset,
        }
    }

    fn from_integer(value: i64) -> TurnNumber {
        match u32::try_from(value) {
            Ok(number) if number > 0 => TurnNumber::Assigned(number),
            _ => TurnNumber::Invalid(value.to_string()),
        }
    }

    pub fn to_cell(&self) -> String {
        match self {
            TurnNumber::Unset => String::new(),
            TurnNumber::Assigned(number) => number.to_string(),
            TurnNumber::Invalid(raw) => raw.clone(),
        }
    }

    /// Non-numeric invalid values cannot live in an integer column and are
    /// stored as unset.
    pub fn to_stored(&self) -> Option<i64> {
        match self {
            TurnNumber::Unset => None,
            TurnNumber::Assigned(number) => Some(*number as i64),
            TurnNumber::Invalid(raw) => raw.trim().parse::<i64>().ok(),
        }
    }

    pub fn assigned(&self) -> Option<u32> {
        match self {
            TurnNumber::Assigned(number) => Some(*number),
            _ => None,
        }
    }
}

impl Display for TurnNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_cell())
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct Participant {
    pub name: Option<String>,
    pub email: String,
    pub number: TurnNumber,
}

impl Participant {
    pub fn new(name: &str, email: &str) -> Participant {
        Participant {
            name: Some(name.to_string()),
            email: email.to_string(),
            number: TurnNumber::Unset,
        }
    }

    pub fn with_number(mut self, number: TurnNumber) -> Participant {
        self.number = number;
        self
    }

    /// A name consisting only of whitespace counts as missing.
    pub fn has_name(&self) -> bool {
        self.name.as_deref().map(|n| !n.trim().is_empty()).unwrap_or(false)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub(crate) fn from_model(model: schema::participant::Model) -> Participant {
        Participant {
            name: model.name,
            email: model.email.unwrap_or_default(),
            number: TurnNumber::from_stored(model.number),
        }
    }

    pub(crate) fn to_active_model(&self) -> schema::participant::ActiveModel {
        schema::participant::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(self.name.clone()),
            email: ActiveValue::Set(Some(self.email.clone())),
            number: ActiveValue::Set(self.number.to_stored()),
        }
    }
}

/// Shared guard for `RosterStore::add`. Returns the trimmed name.
pub fn validate_name(name: &str) -> Result<&str, RosterError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RosterError::InvalidInput("participant name must not be empty".into()));
    }
    Ok(name)
}

/// Validates a batch of `(name, email)` pairs up front and builds the
/// unnumbered participants to append.
pub fn participants_from_entries(entries: &[(String, String)]) -> Result<Vec<Participant>, RosterError> {
    entries.iter()
        .map(|(name, email)| Ok(Participant::new(validate_name(name)?, email.trim())))
        .collect()
}


#[test]
fn test_cell_parsing() {
    assert_eq!(TurnNumber::from_cell(""), TurnNumber::Unset);
    assert_eq!(TurnNumber::from_cell("  "), TurnNumber::Unset);
    assert_eq!(TurnNumber::from_cell("4"), TurnNumber::Assigned(4));
    assert_eq!(TurnNumber::from_cell(" 12 "), TurnNumber::Assigned(12));
    assert_eq!(TurnNumber::from_cell("four"), TurnNumber::Invalid("four".into()));
    assert_eq!(TurnNumber::from_cell("0"), TurnNumber::Invalid("0".into()));
    assert_eq!(TurnNumber::from_cell("-3"), TurnNumber::Invalid("-3".into()));
}

#[test]
fn test_stored_values() {
    assert_eq!(TurnNumber::from_stored(None), TurnNumber::Unset);
    assert_eq!(TurnNumber::from_stored(Some(7)), TurnNumber::Assigned(7));
    assert_eq!(TurnNumber::from_stored(Some(-1)), TurnNumber::Invalid("-1".into()));
    assert_eq!(TurnNumber::from_stored(Some(i64::MAX)), TurnNumber::Invalid(i64::MAX.to_string()));

    assert_eq!(TurnNumber::Invalid("abc".into()).to_stored(), None);
    assert_eq!(TurnNumber::Invalid("0".into()).to_stored(), Some(0));
}

#[test]
fn test_model_conversion_keeps_empty_email_and_unset_number() {
    let participant = Participant::from_model(schema::participant::Model {
        id: 3,
        name: Some("Bob".into()),
        email: None,
        number: None,
    });

    assert_eq!(participant, Participant::new("Bob", ""));
}

#[test]
fn test_validate_name() {
    assert_eq!(validate_name("  Alice ").ok(), Some("Alice"));
    assert!(matches!(validate_name(""), Err(RosterError::InvalidInput(_))));
    assert!(matches!(validate_name(" \t"), Err(RosterError::InvalidInput(_))));
}

#[test]
fn test_participants_from_entries_rejects_whole_batch() {
    let entries = vec![("Alice ".to_string(), " a@x.com".to_string()), ("".to_string(), "".to_string())];
    assert!(matches!(participants_from_entries(&entries), Err(RosterError::InvalidInput(_))));

    let entries = vec![("Alice ".to_string(), " a@x.com".to_string())];
    assert_eq!(participants_from_entries(&entries).ok(), Some(vec![Participant::new("Alice", "a@x.com")]));
}

#[test]
fn test_has_name() {
    assert!(Participant::new("Alice", "").has_name());
    assert!(!Participant::new("", "a@x.com").has_name());
    assert!(!Participant { name: None, email: "".into(), number: TurnNumber::Unset }.has_name());
}
