mod common;

use std::sync::Arc;

use serde_json::json;

use common::{ManualSource, grid_config, product_columns, product_page, wait_until};
use gridline_grid::coordinator::{FetchCoordinator, FetchOutcome};
use gridline_grid::grid::{Grid, LoadPhase};
use gridline_lib::error::FetchError;
use gridline_lib::request::{FilterSet, PageRequest};

#[tokio::test]
async fn later_issue_supersedes_earlier_one() {
    let source = ManualSource::new();
    let coordinator = FetchCoordinator::new(source.clone());

    let fetch_a = coordinator.issue(&PageRequest::new(1, 10)).unwrap();
    let run_a = tokio::spawn(fetch_a.run());
    wait_until("fetch A to start", || source.call_count() == 1).await;

    let fetch_b = coordinator.issue(&PageRequest::new(2, 10)).unwrap();
    assert!(coordinator.is_current(fetch_b.generation()));
    let run_b = tokio::spawn(fetch_b.run());
    wait_until("fetch B to start", || source.call_count() == 2).await;
    assert_eq!(source.request(1).page, 2);

    // B resolves first, then A arrives late.
    source.resolve(1, Ok(product_page(11, 10, 25)));
    let delivery_b = run_b.await.unwrap().expect("current fetch delivers");
    assert_eq!(delivery_b.request.page, 2);

    source.resolve(0, Ok(product_page(1, 10, 25)));
    assert!(run_a.await.unwrap().is_none(), "stale fetch must not deliver");
}

#[tokio::test]
async fn replacing_the_channel_cancels_in_flight_fetches() {
    let source = ManualSource::new();
    let coordinator = FetchCoordinator::new(source.clone());

    let fetch = coordinator.issue(&PageRequest::new(1, 10)).unwrap();
    let run = tokio::spawn(fetch.run());
    wait_until("fetch to start", || source.call_count() == 1).await;

    coordinator.replace_channel();
    assert!(run.await.unwrap().is_none());
}

#[tokio::test]
async fn shutdown_cancels_everything() {
    let source = ManualSource::new();
    let coordinator = FetchCoordinator::new(source.clone());

    let fetch = coordinator.issue(&PageRequest::new(1, 10)).unwrap();
    let run = tokio::spawn(fetch.run());
    wait_until("fetch to start", || source.call_count() == 1).await;

    coordinator.shutdown();
    assert!(run.await.unwrap().is_none());
}

#[tokio::test]
async fn source_errors_deliver_as_failed_outcomes() {
    let source = ManualSource::new();
    let coordinator = FetchCoordinator::new(source.clone());

    let fetch = coordinator.issue(&PageRequest::new(1, 10)).unwrap();
    let run = tokio::spawn(fetch.run());
    wait_until("fetch to start", || source.call_count() == 1).await;

    source.resolve(0, Err(FetchError::transport("socket closed")));
    let delivery = run.await.unwrap().expect("failure still delivers once");
    assert!(matches!(delivery.outcome, FetchOutcome::Failed(_)));
}

#[tokio::test]
async fn malformed_requests_are_rejected_before_issue() {
    let source = ManualSource::new();
    let coordinator = FetchCoordinator::new(source.clone());

    let error = coordinator.issue(&PageRequest::new(1, 0)).unwrap_err();
    assert!(matches!(error, FetchError::Validation(_)));
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn grid_shows_newest_result_despite_out_of_order_completion() {
    let source = ManualSource::new();
    let grid = Grid::new(product_columns(), grid_config(), source.clone());

    grid.load().unwrap();
    wait_until("fetch A to start", || source.call_count() == 1).await;

    grid.page_change(2, 10).unwrap();
    wait_until("fetch B to start", || source.call_count() == 2).await;

    // B lands first.
    source.resolve(1, Ok(product_page(11, 10, 25)));
    wait_until("B to apply", || grid.phase() == LoadPhase::Loaded).await;

    // A resolves afterwards; it must be discarded, not applied.
    source.resolve(0, Ok(product_page(1, 10, 25)));
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let rows = grid.rows();
    assert_eq!(rows[0]["id"], json!(11));
    assert_eq!(grid.page_info().unwrap().page, 2);
}

#[tokio::test]
async fn cleared_filter_is_not_overwritten_by_the_stale_search() {
    let source = ManualSource::new();
    let grid = Grid::new(product_columns(), grid_config(), source.clone());

    grid.load().unwrap();
    wait_until("initial fetch", || source.call_count() == 1).await;
    source.resolve(0, Ok(product_page(1, 10, 25)));
    wait_until("initial load", || grid.phase() == LoadPhase::Loaded).await;

    grid.filter_change(Some(FilterSet::global("phone"))).unwrap();
    wait_until("search fetch", || source.call_count() == 2).await;

    // Clear the filter while the search is still in flight.
    grid.filter_change(None).unwrap();
    wait_until("unfiltered fetch", || source.call_count() == 3).await;
    assert!(grid.request().filters.is_none());
    assert_eq!(grid.request().page, 1);

    // The unfiltered page lands, then the stale search result trickles in.
    source.resolve(2, Ok(product_page(1, 10, 25)));
    wait_until("unfiltered apply", || grid.phase() == LoadPhase::Loaded).await;
    source.resolve(1, Ok(product_page(5, 1, 1)));
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let info = grid.page_info().unwrap();
    assert_eq!(info.total_count, 25);
    assert_eq!(grid.rows().len(), 10);
    assert_eq!(grid.rows()[0]["id"], json!(1));
}

#[tokio::test]
async fn torn_down_grid_is_never_mutated_by_late_resolutions() {
    let source = ManualSource::new();
    let grid = Grid::new(product_columns(), grid_config(), source.clone());

    grid.load().unwrap();
    wait_until("fetch to start", || source.call_count() == 1).await;

    grid.shutdown();
    source.resolve(0, Ok(product_page(1, 10, 25)));
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    assert!(grid.rows().is_empty());
    assert_eq!(grid.phase(), LoadPhase::Loading);
}
