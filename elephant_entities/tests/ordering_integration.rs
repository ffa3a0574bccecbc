use elephant_entities::{prelude::*, mock::{self, MockOption}};
use rand::{rngs::StdRng, SeedableRng};

mod common;
use common::{assert_is_permutation, for_each_backend, set_up_sqlite_store};


#[tokio::test]
async fn test_assign_numbers_yields_permutation() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        for count in [1, 2, 7, 30] {
            store.replace_all(&mock::make_mock_roster_with_options(MockOption { num_participants: count, ..Default::default() })).await?;

            let outcome = assign_numbers(store.as_ref()).await?;

            assert_eq!(outcome.assigned, count as usize);
            assert_is_permutation(&store.list_all().await?);
        }
        Ok(())
    }).await
}

#[tokio::test]
async fn test_assign_twice_yields_two_valid_permutations() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.replace_all(&mock::make_mock_roster()).await?;

        assign_numbers(store.as_ref()).await?;
        assert_is_permutation(&store.list_all().await?);

        assign_numbers(store.as_ref()).await?;
        assert_is_permutation(&store.list_all().await?);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_assign_on_empty_roster_fails_without_mutation() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        assert!(matches!(assign_numbers(store.as_ref()).await, Err(RosterError::EmptyRoster)));
        assert_eq!(store.count().await?, 0);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_assign_overwrites_corrupted_numbers() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.replace_all(&[
            Participant::new("A", "").with_number(TurnNumber::Assigned(1)),
            Participant::new("B", "").with_number(TurnNumber::Assigned(1)),
            Participant::new("C", "").with_number(TurnNumber::Assigned(9)),
            Participant::new("D", ""),
        ]).await?;

        assign_numbers(store.as_ref()).await?;

        assert_is_permutation(&store.list_all().await?);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_seeded_assignment_is_reproducible() -> Result<(), RosterError> {
    let first = set_up_sqlite_store(true).await?;
    let second = set_up_sqlite_store(true).await?;

    assign_numbers_with_rng(&first, &mut StdRng::seed_from_u64(99)).await?;
    assign_numbers_with_rng(&second, &mut StdRng::seed_from_u64(99)).await?;

    assert_eq!(first.list_all().await?, second.list_all().await?);
    Ok(())
}

#[tokio::test]
async fn test_ordered_roster_is_sorted() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.replace_all(&mock::make_mock_roster()).await?;
        assign_numbers(store.as_ref()).await?;

        let roster = ordered_roster(store.as_ref()).await?;

        assert_eq!(roster.len(), 12);
        assert_eq!(roster.iter().map(|p| p.number).collect::<Vec<_>>(), (1..=12).collect::<Vec<_>>());
        assert_eq!(roster.first().number, 1);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_ordered_roster_keeps_valid_numbers() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.replace_all(&[
            Participant::new("Alice", "a@x.com").with_number(TurnNumber::Assigned(2)),
            Participant::new("Bob", "").with_number(TurnNumber::Assigned(1)),
        ]).await?;

        let roster = ordered_roster(store.as_ref()).await?;

        assert_eq!(roster.into_inner(), vec![
            OrderedParticipant { number: 1, name: "Bob".into(), email: "".into() },
            OrderedParticipant { number: 2, name: "Alice".into(), email: "a@x.com".into() },
        ]);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_ordered_roster_heals_unset_number() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.replace_all(&[
            Participant::new("Alice", "").with_number(TurnNumber::Assigned(1)),
            Participant::new("Bob", ""),
            Participant::new("Carol", "").with_number(TurnNumber::Assigned(2)),
        ]).await?;

        let roster = ordered_roster(store.as_ref()).await?;

        assert_eq!(roster.iter().map(|p| p.number).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_is_permutation(&store.list_all().await?);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_ordered_roster_heals_duplicate_numbers() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        store.replace_all(&[
            Participant::new("Alice", "").with_number(TurnNumber::Assigned(1)),
            Participant::new("Bob", "").with_number(TurnNumber::Assigned(1)),
        ]).await?;

        let roster = ordered_roster(store.as_ref()).await?;

        assert_eq!(roster.iter().map(|p| p.number).collect::<Vec<_>>(), vec![1, 2]);
        Ok(())
    }).await
}

#[tokio::test]
async fn test_ordered_roster_heals_non_numeric_number() -> Result<(), RosterError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("roster.csv");
    std::fs::write(&path, "name,email,number\nAlice,a@x.com,first\nBob,b@x.com,2\n")?;
    let store = CsvRosterStore::new(&path);

    let roster = ordered_roster(&store).await?;

    assert_eq!(roster.iter().map(|p| p.number).collect::<Vec<_>>(), vec![1, 2]);
    assert_is_permutation(&store.list_all().await?);
    Ok(())
}

#[tokio::test]
async fn test_ordered_roster_on_empty_roster_fails() -> Result<(), RosterError> {
    for_each_backend(|store| async move {
        assert!(matches!(ordered_roster(store.as_ref()).await, Err(RosterError::EmptyRoster)));
        Ok(())
    }).await
}
