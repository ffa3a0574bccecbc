use std::fs;

use elephant_backend::{actions::*, import::CSVReaderConfig, View};
use elephant_entities::prelude::*;

mod common;


#[tokio::test]
async fn test_add_participant_action() -> Result<(), RosterError> {
    let store = common::set_up_store(false).await?;

    let message = Action::AddParticipant { action: AddParticipantAction { name: " Alice ".into(), email: "alice@example.com".into() } }
        .execute(&store).await?;

    assert_eq!(message, "Added Alice with email alice@example.com to the roster");
    assert_eq!(store.list_all().await?, vec![Participant::new("Alice", "alice@example.com")]);
    Ok(())
}

#[tokio::test]
async fn test_add_empty_name_is_unsuccessful_response() -> Result<(), RosterError> {
    let store = common::set_up_store(false).await?;

    let response = Action::AddParticipant { action: AddParticipantAction { name: "   ".into(), email: "".into() } }
        .run(&store).await?;

    assert!(!response.success);
    assert_eq!(store.count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_delete_participant_action_reports_count() -> Result<(), RosterError> {
    let store = common::set_up_store(false).await?;
    store.add("X", "").await?;
    store.add("X", "").await?;
    store.add("Y", "").await?;

    let message = DeleteParticipantAction { name: "X".into() }.execute(&store).await?;
    assert_eq!(message, "Deleted 2 participants named X from the roster");

    let message = DeleteParticipantAction { name: "X".into() }.execute(&store).await?;
    assert_eq!(message, "No participant named X found");
    assert_eq!(store.count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_prune_on_empty_roster_is_unsuccessful() -> Result<(), RosterError> {
    let store = common::set_up_store(false).await?;

    let response = Action::PruneParticipants { action: PruneParticipantsAction {} }.run(&store).await?;

    assert_eq!(response, ActionResponse { success: false, message: Some("No participants found".into()) });
    Ok(())
}

#[tokio::test]
async fn test_assign_and_clear_actions() -> Result<(), RosterError> {
    let store = common::set_up_store(true).await?;

    let message = AssignNumbersAction { seed: Some(42) }.execute(&store).await?;
    assert_eq!(message, "Numbers assigned to 12 participants");
    assert_eq!(check_numbering(&store.list_all().await?), Ok(()));

    let message = ClearRosterAction {}.execute(&store).await?;
    assert_eq!(message, "Roster cleared");
    assert_eq!(store.count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_seeded_assignment_is_reproducible() -> Result<(), RosterError> {
    let first = common::set_up_store(true).await?;
    let second = common::set_up_store(true).await?;

    AssignNumbersAction { seed: Some(7) }.execute(&first).await?;
    AssignNumbersAction { seed: Some(7) }.execute(&second).await?;

    assert_eq!(first.list_all().await?, second.list_all().await?);
    Ok(())
}

#[tokio::test]
async fn test_action_deserializes_from_tagged_json() -> Result<(), anyhow::Error> {
    let store = common::set_up_store(false).await?;
    let action: Action = serde_json::from_str(r#"{"type": "AddParticipant", "action": {"name": "Bob"}}"#)?;

    let response = action.run(&store).await?;

    assert_eq!(response, ActionResponse { success: true, message: Some("Added Bob to the roster".into()) });
    Ok(())
}

#[tokio::test]
async fn test_upload_participants_list_detects_columns() -> Result<(), anyhow::Error> {
    let store = common::set_up_store(false).await?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("participants.csv");
    fs::write(&path, "Vorname;Nachname;E-Mail\nJane;Doe;jane@example.com\n;;nobody@example.com\nJohn;Roe;\n")?;

    let message = UploadParticipantsListAction { path: path.clone(), parser_config: None }.execute(&store).await?;

    assert!(message.starts_with("Imported 2 participants"));
    assert!(message.ends_with("skipped 1 rows without a name"));
    assert_eq!(store.list_all().await?, vec![
        Participant::new("Jane Doe", "jane@example.com"),
        Participant::new("John Roe", ""),
    ]);
    Ok(())
}

#[tokio::test]
async fn test_upload_appends_after_existing_participants() -> Result<(), anyhow::Error> {
    let store = common::set_up_store(false).await?;
    store.add("Alice", "").await?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("participants.csv");
    fs::write(&path, "Name,Email
Bob,bob@example.com
Carol,
Dave,dave@example.com
")?;

    let message = UploadParticipantsListAction { path, parser_config: None }.execute(&store).await?;

    assert!(message.starts_with("Imported 3 participants"));
    assert_eq!(
        store.list_all().await?.into_iter().map(|p| p.name.unwrap_or_default()).collect::<Vec<_>>(),
        vec!["Alice", "Bob", "Carol", "Dave"]
    );
    Ok(())
}

#[tokio::test]
async fn test_upload_without_name_column_is_rejected() -> Result<(), anyhow::Error> {
    let store = common::set_up_store(false).await?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("participants.csv");
    fs::write(&path, "Email\na@example.com\n")?;
    let parser_config = CSVReaderConfig::default_from_file(fs::File::open(&path)?)?;

    let response = Action::UploadParticipantsList { action: UploadParticipantsListAction { path, parser_config: Some(parser_config) } }
        .run(&store).await?;

    assert!(!response.success);
    assert_eq!(store.count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_upload_of_missing_file_is_not_fatal() -> Result<(), anyhow::Error> {
    let store = common::set_up_store(false).await?;

    let response = UploadParticipantsListAction { path: "does/not/exist.csv".into(), parser_config: None };
    let response = Action::UploadParticipantsList { action: response }.run(&store).await?;

    assert!(!response.success);
    Ok(())
}

#[tokio::test]
async fn test_participants_list_view_lines() -> Result<(), RosterError> {
    let store = common::set_up_store(false).await?;
    store.add("Alice", "alice@example.com").await?;
    store.add("Bob", "").await?;

    let lines = View::ParticipantsList.load_lines(&store).await?;

    assert_eq!(lines, vec!["Alice | alice@example.com", "Bob | "]);
    Ok(())
}

#[tokio::test]
async fn test_turn_order_view_heals_and_sorts() -> Result<(), anyhow::Error> {
    let store = common::set_up_store(true).await?;

    let lines = View::TurnOrder.load_lines(&store).await?;

    assert_eq!(lines.len(), 12);
    for (idx, line) in lines.iter().enumerate() {
        assert!(line.starts_with(&format!("{}: Participant ", idx + 1)));
    }
    check_numbering(&store.list_all().await?)?;

    let json: serde_json::Value = serde_json::from_str(&View::TurnOrder.load_json(&store).await?)?;
    assert_eq!(json["entries"].as_array().map(|a| a.len()), Some(12));
    Ok(())
}

#[tokio::test]
async fn test_views_on_empty_roster() -> Result<(), RosterError> {
    let store = common::set_up_store(false).await?;

    assert!(matches!(View::ParticipantsList.load_lines(&store).await, Err(RosterError::EmptyRoster)));
    assert!(matches!(View::TurnOrder.load_lines(&store).await, Err(RosterError::EmptyRoster)));
    Ok(())
}
