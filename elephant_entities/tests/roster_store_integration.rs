use elephant_entities::{prelude::*, mock::{self, MockOption}};

mod common;
use common::for_each_backend;


#[tokio::test]
async fn test_add_appends_unnumbered_participant() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.add("Alice", "alice@example.com").await?;
        store.add("Bob", "").await?;

        assert_eq!(store.list_all().await?, vec![
            Participant::new("Alice", "alice@example.com"),
            Participant::new("Bob", ""),
        ]);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_add_rejects_empty_name() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        assert!(matches!(store.add("", "x@example.com").await, Err(RosterError::InvalidInput(_))));
        assert!(matches!(store.add("   ", "").await, Err(RosterError::InvalidInput(_))));
        assert_eq!(store.count().await?, 0);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_add_many_appends_in_order() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.add("Alice", "alice@example.com").await?;
        let added = store.add_many(&[
            ("Bob".to_string(), "bob@example.com".to_string()),
            (" Carol ".to_string(), "".to_string()),
        ]).await?;

        assert_eq!(added, vec![Participant::new("Bob", "bob@example.com"), Participant::new("Carol", "")]);
        assert_eq!(store.list_all().await?, vec![
            Participant::new("Alice", "alice@example.com"),
            Participant::new("Bob", "bob@example.com"),
            Participant::new("Carol", ""),
        ]);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_add_many_with_invalid_entry_stores_nothing() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.add("Alice", "").await?;
        let result = store.add_many(&[
            ("Bob".to_string(), "".to_string()),
            (" ".to_string(), "nobody@example.com".to_string()),
        ]).await;

        assert!(matches!(result, Err(RosterError::InvalidInput(_))));
        assert_eq!(store.list_all().await?, vec![Participant::new("Alice", "")]);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_add_trims_input() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.add("  Carol ", " carol@example.com ").await?;
        assert_eq!(store.list_all().await?, vec![Participant::new("Carol", "carol@example.com")]);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_list_is_a_snapshot() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.add("Alice", "").await?;
        let snapshot = store.list_all().await?;
        store.add("Bob", "").await?;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.count().await?, 2);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_delete_by_name_removes_all_matches() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.add("X", "first@example.com").await?;
        store.add("Y", "").await?;
        store.add("X", "second@example.com").await?;
        let before = store.count().await?;

        let removed = store.delete_by_name("X").await?;

        assert_eq!(removed, 2);
        assert_eq!(store.count().await?, before - 2);
        assert_eq!(store.list_all().await?, vec![Participant::new("Y", "")]);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_delete_unknown_name_is_noop() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.add("Alice", "").await?;
        assert_eq!(store.delete_by_name("alice").await?, 0);
        assert_eq!(store.count().await?, 1);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_prune_removes_nameless_rows() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.replace_all(&[
            Participant::new("Alice", "a@x.com").with_number(TurnNumber::Assigned(1)),
            Participant::new("", ""),
            Participant { name: None, email: "b@x.com".into(), number: TurnNumber::Assigned(2) },
        ]).await?;

        let removed = store.prune().await?;

        assert_eq!(removed, 2);
        assert_eq!(store.list_all().await?, vec![
            Participant::new("Alice", "a@x.com").with_number(TurnNumber::Assigned(1)),
        ]);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_prune_treats_whitespace_only_names_as_missing() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.replace_all(&[
            Participant::new("Alice", "a@x.com"),
            Participant::new("\t", ""),
            Participant::new("\u{a0}", ""),
            Participant::new(" \n ", ""),
        ]).await?;

        assert_eq!(store.prune().await?, 3);
        assert_eq!(store.list_all().await?, vec![Participant::new("Alice", "a@x.com")]);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_prune_on_clean_roster_is_noop() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.replace_all(&mock::make_mock_roster()).await?;
        assert_eq!(store.prune().await?, 0);
        assert_eq!(store.count().await?, 12);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_clear_empties_roster_and_store_stays_usable() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.replace_all(&mock::make_mock_roster()).await?;
        store.clear().await?;
        assert_eq!(store.count().await?, 0);

        store.add("Alice", "").await?;
        assert_eq!(store.count().await?, 1);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_round_trip_keeps_empty_email_and_unset_number() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        let participants = vec![
            Participant::new("Alice", "a@x.com").with_number(TurnNumber::Assigned(2)),
            Participant::new("Bob", "").with_number(TurnNumber::Assigned(1)),
            Participant::new("Carol", "carol@example.com"),
        ];

        store.replace_all(&participants).await?;

        assert_eq!(store.list_all().await?, participants);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_write_numbers_is_positional() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.replace_all(&mock::make_mock_roster_with_options(MockOption { num_participants: 3, ..Default::default() })).await?;

        store.write_numbers(&[3, 1, 2]).await?;

        let numbers = store.list_all().await?.into_iter().map(|p| p.number).collect::<Vec<_>>();
        assert_eq!(numbers, vec![TurnNumber::Assigned(3), TurnNumber::Assigned(1), TurnNumber::Assigned(2)]);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_write_numbers_rejects_count_mismatch() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.replace_all(&mock::make_mock_roster_with_options(MockOption { num_participants: 3, ..Default::default() })).await?;

        let result = store.write_numbers(&[1, 2]).await;

        assert!(matches!(
            result,
            Err(RosterError::InvalidState(InvalidNumbering::CountMismatch { expected: 3, actual: 2 }))
        ));
        assert!(store.list_all().await?.iter().all(|p| p.number == TurnNumber::Unset));
        Ok(())
    }).await
}
