use faker_rand::en_us::names::FullName;

use crate::domain::{Participant, TurnNumber};


#[derive(Debug)]
pub struct MockOption {
    pub num_participants: u32,
    pub use_random_names: bool,
    pub with_emails: bool,
    pub assign_numbers: bool,
}

impl Default for MockOption {
    fn default() -> Self {
        Self {
            num_participants: 12,
            use_random_names: false,
            with_emails: true,
            assign_numbers: false,
        }
    }
}

pub fn make_mock_roster() -> Vec<Participant> {
    make_mock_roster_with_options(Default::default())
}

/// Numbers, if requested, are assigned in insertion order (1, 2, ...).
pub fn make_mock_roster_with_options(options: MockOption) -> Vec<Participant> {
    (1..=options.num_participants).map(|idx| {
        let name = if options.use_random_names {
            rand::random::<FullName>().to_string()
        } else {
            format!("Participant {}", idx)
        };

        let email = if options.with_emails {
            format!("participant{}@example.com", idx)
        } else {
            String::new()
        };

        let number = if options.assign_numbers {
            TurnNumber::Assigned(idx)
        } else {
            TurnNumber::Unset
        };

        Participant::new(&name, &email).with_number(number)
    }).collect()
}

#[test]
fn test_mock_roster_defaults() {
    let roster = make_mock_roster();
    assert_eq!(roster.len(), 12);
    assert_eq!(roster[0].name.as_deref(), Some("Participant 1"));
    assert_eq!(roster[11].email, "participant12@example.com");
    assert!(roster.iter().all(|p| p.number == TurnNumber::Unset));
}

#[test]
fn test_mock_roster_with_random_names() {
    let roster = make_mock_roster_with_options(MockOption { num_participants: 4, use_random_names: true, ..Default::default() });
    assert_eq!(roster.len(), 4);
    assert!(roster.iter().all(|p| p.has_name()));
}
