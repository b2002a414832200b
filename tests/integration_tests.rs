//! Integration tests against the in-memory store
//!
//! Exercises the public API end to end: seeding, listings, paging with
//! cursor tokens carried between independent calls, and the CLI runner.

use clap::Parser;
use goalpost::cli::{Cli, Commands, Runner};
use goalpost::config::Backend;
use goalpost::pagination::{Cursor, Pager};
use goalpost::query;
use goalpost::stats::{insert_seed_data, PlayerStats, SeedOutcome};
use goalpost::storage::{MemoryStore, QueryRequest, StorageClient};
use goalpost::Record;
use std::sync::Arc;

async fn seeded_service() -> (PlayerStats, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let stats = PlayerStats::new(store.clone());
    assert_eq!(insert_seed_data(&stats).await.unwrap(), SeedOutcome::Inserted(6));
    (stats, store)
}

/// A squad with 30 players over two teams sharing one country
async fn squad_service() -> (PlayerStats, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let stats = PlayerStats::new(store.clone());
    for n in 0..15u32 {
        stats
            .put_player_stats(&Record::new("USA", "WNT", format!("w{n:02}"), "p", n * 7, 0, 10))
            .await
            .unwrap();
        stats
            .put_player_stats(&Record::new("USA", "MNT", format!("m{n:02}"), "p", n * 5, 0, 10))
            .await
            .unwrap();
    }
    (stats, store)
}

// ============================================================================
// Seeded Scenarios
// ============================================================================

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let (stats, store) = seeded_service().await;
    assert_eq!(
        insert_seed_data(&stats).await.unwrap(),
        SeedOutcome::AlreadyPopulated
    );
    assert_eq!(store.len().await, 6);
}

#[tokio::test]
async fn test_portugal_page_of_four() {
    let (stats, _) = seeded_service().await;
    let (records, cursor) = stats
        .list_players_by_goals_threshold("Portugal", "MNT", 10, &Cursor::new(4))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].goals, 118);
    assert!(cursor.last_evaluated_key.is_none());
}

#[tokio::test]
async fn test_usa_sorted_pages_via_tokens() {
    let (stats, _) = seeded_service().await;

    let (first, cursor) = stats
        .list_players_by_goals_threshold_sorted("USA", "WNT", 10, &Cursor::new(1))
        .await
        .unwrap();
    assert_eq!(first[0].goals, 63);

    // Hand the cursor across a process boundary as a token
    let token = cursor.to_token().unwrap();
    let resumed = Cursor::from_token(&token).unwrap();

    let (second, cursor) = stats
        .list_players_by_goals_threshold_sorted("USA", "WNT", 10, &resumed)
        .await
        .unwrap();
    assert_eq!(second[0].goals, 119);
    assert!(cursor.last_evaluated_key.is_none());
}

#[tokio::test]
async fn test_missing_player_is_absent() {
    let (stats, _) = seeded_service().await;
    let found = stats
        .get_player_stats("USA", "WNT", "No", "Body")
        .await
        .unwrap();
    assert!(found.is_none());
}

// ============================================================================
// Larger Partitions
// ============================================================================

#[tokio::test]
async fn test_filtered_pages_match_unbounded_listing() {
    let (stats, store) = squad_service().await;
    let plan = query::team_listing_with_goal_filter("USA", "WNT", 40).unwrap();
    let expected = store.query(&plan, &QueryRequest::new()).await.unwrap().items;
    assert_eq!(expected.len(), 9);

    let mut cursor = Cursor::new(2);
    let mut collected = Vec::new();
    loop {
        let (records, next) = stats
            .list_players_by_goals_threshold("USA", "WNT", 40, &cursor)
            .await
            .unwrap();
        assert!(records.len() <= 2);
        collected.extend(records);
        cursor = next;
        if cursor.last_evaluated_key.is_none() {
            break;
        }
    }
    assert_eq!(collected, expected);
}

#[tokio::test]
async fn test_sorted_pages_skip_interleaved_team() {
    let (_stats, store) = squad_service().await;
    let plan = query::team_listing_by_goals("USA", "WNT", 20).unwrap();

    let pages = Pager::new(store.as_ref(), plan, Cursor::new(3).descending(true))
        .collect_pages()
        .await
        .unwrap();
    let goals: Vec<u32> = pages.iter().flatten().map(|r| r.goals).collect();

    assert_eq!(goals, vec![98, 91, 84, 77, 70, 63, 56, 49, 42, 35, 28, 21]);
    assert!(pages.iter().flatten().all(|r| r.national_team == "WNT"));
}

#[tokio::test]
async fn test_list_all_follows_store_pages() {
    let (stats, _) = squad_service().await;
    let all = stats.list_all_players("USA", "MNT").await.unwrap();
    assert_eq!(all.len(), 15);
    assert!(all.windows(2).all(|w| w[0].sort_key < w[1].sort_key));
}

// ============================================================================
// CLI Runner
// ============================================================================

#[test]
fn test_cli_parses_paging_flags() {
    let cli = Cli::try_parse_from([
        "goalpost",
        "--backend",
        "dynamo",
        "--endpoint",
        "http://localhost:8000",
        "by-goals-sorted",
        "--country",
        "USA",
        "--team",
        "WNT",
        "--page-size",
        "1",
        "--descending",
    ])
    .unwrap();
    assert_eq!(cli.backend, Some(Backend::Dynamo));

    let config = Runner::new(cli).store_config().unwrap();
    assert_eq!(config.backend, Backend::Dynamo);
    assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8000"));
}

#[test]
fn test_cli_cursor_excludes_page_size_and_direction() {
    let base = ["goalpost", "by-goals", "--country", "USA", "--team", "WNT"];

    let cli = Cli::try_parse_from(base.into_iter().chain(["--cursor", "abc"])).unwrap();
    match cli.command {
        Commands::ByGoals { paging, .. } => {
            assert_eq!(paging.cursor.as_deref(), Some("abc"));
            assert_eq!(paging.page_size, 4);
        }
        other => panic!("unexpected command: {other:?}"),
    }

    for extra in [
        &["--cursor", "abc", "--page-size", "2"][..],
        &["--cursor", "abc", "--descending"][..],
    ] {
        let err = Cli::try_parse_from(base.into_iter().chain(extra.iter().copied())).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}

#[tokio::test]
async fn test_cli_demo_runs_against_memory() {
    let store = Arc::new(MemoryStore::new());
    let stats = PlayerStats::new(store.clone());
    let cli = Cli::try_parse_from(["goalpost", "demo"]).unwrap();

    Runner::new(cli).run_with(&stats).await.unwrap();
    assert_eq!(store.len().await, 6);
}

#[tokio::test]
async fn test_cli_rejects_bad_cursor_token() {
    let (stats, _) = seeded_service().await;
    let cli = Cli::try_parse_from([
        "goalpost", "by-goals", "--country", "USA", "--team", "WNT", "--cursor", "%%%",
    ])
    .unwrap();

    let err = Runner::new(cli).run_with(&stats).await.unwrap_err();
    assert!(matches!(err, goalpost::Error::Cursor { .. }));
}
