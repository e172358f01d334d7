//! End-to-end sync cycles over in-memory and file sources

mod common;

use common::{fixed_now, seeded_source};
use leaderboard_server::publish::MemorySink;
use leaderboard_server::sources::{JsonFileSource, MemorySource, SourceTable};
use leaderboard_server::sync::{EngineSettings, SyncEngine, SyncError};
use serde_json::{Value, json};
use std::sync::Arc;

fn engine(source: Arc<MemorySource>, sink: Arc<MemorySink>) -> SyncEngine {
    SyncEngine::with_clock(source, sink, EngineSettings::default(), Arc::new(fixed_now))
}

#[tokio::test]
async fn test_leaderboard_totals_and_ranks() {
    let sink = Arc::new(MemorySink::new());
    let engine = engine(seeded_source(), sink.clone());

    let report = engine.sync().await;
    assert!(report.success, "{}", report.message);
    assert_eq!(report.teams_count, Some(3));

    let snapshot = sink.get("sparkTank").unwrap();
    let board = snapshot["leaderboard"].as_array().unwrap();
    let summary: Vec<(&str, i64, u64)> = board
        .iter()
        .map(|e| {
            (
                e["teamName"].as_str().unwrap(),
                e["totalSales"].as_i64().unwrap(),
                e["rank"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![("Momo Hub", 1500, 1), ("Chai Co", 500, 2), ("Dosa Den", 0, 3)]
    );

    let chai = &board[1];
    assert_eq!(chai["transactionCount"], 1);
    assert_eq!(chai["members"], json!(["Asha", "Vikram"]));
    assert_eq!(chai["trend"], "stable");
    assert_eq!(board[2]["avgOrderValue"], 0);
    assert_eq!(board[2]["lastTransaction"], Value::Null);

    assert_eq!(snapshot["metadata"]["totalSales"], 2000);
    assert_eq!(snapshot["metadata"]["totalOrders"], 2);
    assert_eq!(snapshot["metadata"]["activeTeams"], 3);
    assert_eq!(snapshot["lastSync"], "2024-03-02T06:00:00Z");
}

#[tokio::test]
async fn test_captured_in_feed_but_not_in_totals() {
    let sink = Arc::new(MemorySink::new());
    let engine = engine(seeded_source(), sink.clone());
    assert!(engine.sync().await.success);

    let snapshot = sink.get("sparkTank").unwrap();
    let feed = snapshot["recentTransactions"].as_array().unwrap();
    // every delivery with an event type and timestamp, newest first
    assert_eq!(feed.len(), 5);
    assert_eq!(feed[0]["paymentId"], "pay_4");
    assert_eq!(feed[0]["teamName"], "Unknown Team");

    let captured = feed.iter().find(|t| t["paymentId"] == "pay_2").unwrap();
    assert_eq!(captured["eventType"], "payment.captured");
    assert_eq!(captured["teamName"], "Dosa Den");

    let dosa = snapshot["leaderboard"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["teamName"] == "Dosa Den")
        .unwrap();
    assert_eq!(dosa["totalSales"], 0);

    let stats = engine.current().unwrap().stats;
    assert_eq!(stats.normalize.rejected, 1);
    assert_eq!(stats.collapsed, 1);
    assert_eq!(stats.unknown_accounts, 1);
}

#[tokio::test]
async fn test_identical_inputs_publish_identical_bytes() {
    let source = seeded_source();
    let first_sink = Arc::new(MemorySink::new());
    let second_sink = Arc::new(MemorySink::new());

    assert!(engine(source.clone(), first_sink.clone()).sync().await.success);
    assert!(engine(source, second_sink.clone()).sync().await.success);

    let first = serde_json::to_string(&first_sink.get("sparkTank").unwrap()).unwrap();
    let second = serde_json::to_string(&second_sink.get("sparkTank").unwrap()).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_publish_failure_keeps_prior_snapshot() {
    let source = seeded_source();
    let sink = Arc::new(MemorySink::new());
    let engine = engine(source.clone(), sink.clone());
    assert!(engine.sync().await.success);
    let before = sink.get("sparkTank").unwrap();

    source.set_rows(SourceTable::Payments, Vec::new());
    sink.fail_path("sparkTank");
    let result = engine.run_cycle().await;

    assert!(matches!(
        result.outcome,
        Err(SyncError::PublishFailure { ref path, .. }) if path == "sparkTank"
    ));
    assert_eq!(sink.get("sparkTank").unwrap(), before);
    assert_eq!(engine.current().unwrap().eligible.len(), 3);
}

#[tokio::test]
async fn test_source_failure_publishes_nothing_but_access() {
    let source = seeded_source();
    source.fail(SourceTable::Teams);
    let sink = Arc::new(MemorySink::new());
    let engine = engine(source, sink.clone());

    let report = engine.sync().await;
    assert!(!report.success);
    assert!(report.message.contains("teams"));
    assert!(report.access_synced);
    assert!(sink.get("sparkTank").is_none());

    // republished verbatim, blank-email rows dropped
    let access = sink.get("access").unwrap();
    assert_eq!(access.as_array().unwrap().len(), 2);
    assert_eq!(access[0]["Access Type"], "admin");
    assert_eq!(engine.access().len(), 2);
}

#[tokio::test]
async fn test_access_failure_does_not_block_leaderboard() {
    let sink = Arc::new(MemorySink::new());
    sink.fail_path("access");
    let engine = engine(seeded_source(), sink.clone());

    let report = engine.sync().await;
    assert!(report.success);
    assert!(!report.access_synced);
    assert!(sink.get("sparkTank").is_some());
    assert!(engine.access().is_empty());
}

#[tokio::test]
async fn test_json_file_source_cycle() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("teams.json"),
        json!([
            ["Group", "Team Name", "Account ID"],
            ["A", "Chai Co", "acc_1"],
            ["B", "Momo Hub", "acc_2"]
        ])
        .to_string(),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("payments.json"),
        json!([
            {"entityId": "pay_1", "eventType": "order.paid", "status": "paid",
             "amount": 250, "timestamp": "2024-03-01T10:00:00Z", "accountId": "acc_2"}
        ])
        .to_string(),
    )
    .unwrap();

    let sink = Arc::new(MemorySink::new());
    let engine = SyncEngine::with_clock(
        Arc::new(JsonFileSource::new(dir.path())),
        sink.clone(),
        EngineSettings::default(),
        Arc::new(fixed_now),
    );

    let report = engine.sync().await;
    assert!(report.success, "{}", report.message);
    let snapshot = sink.get("sparkTank").unwrap();
    assert_eq!(snapshot["leaderboard"][0]["teamName"], "Momo Hub");
    assert_eq!(snapshot["leaderboard"][0]["totalSales"], 250);
    // no access.json: published as an empty list
    assert_eq!(sink.get("access"), Some(json!([])));
}
