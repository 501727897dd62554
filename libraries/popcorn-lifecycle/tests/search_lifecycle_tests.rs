//! Search lifecycle ordering tests


use popcorn_core::FetchError;
use popcorn_lifecycle::{LoadState, SearchController};
use test_helpers::{results, GatedCatalog};

#[tokio::test]
async fn test_search_success() {
    let catalog = GatedCatalog::new();
    let gate = catalog.gate_search("inception");
    let mut search = SearchController::new(catalog.clone());

    let handle = search.set_query("inception").unwrap();
    assert!(search.state().is_loading());

    gate.send(Ok(results(&["Inception"]))).unwrap();
    handle.await.unwrap();

    let state = search.state();
    assert_eq!(state.results().len(), 1);
    assert_eq!(state.results()[0].title, "Inception");
}

#[tokio::test]
async fn test_late_response_for_old_query_is_discarded() {
    let catalog = GatedCatalog::new();
    let first = catalog.gate_search("mat");
    let second = catalog.gate_search("matrix");
    let mut search = SearchController::new(catalog.clone());

    let old = search.set_query("mat").unwrap();
    let new = search.set_query("matrix").unwrap();

    // Newer query resolves first
    second.send(Ok(results(&["The Matrix"]))).unwrap();
    new.await.unwrap();
    assert_eq!(search.state().results()[0].title, "The Matrix");

    // Older query resolves afterwards and must not overwrite
    first.send(Ok(results(&["Mat"]))).unwrap();
    old.await.unwrap();
    assert_eq!(search.state().results()[0].title, "The Matrix");
    assert_eq!(catalog.calls(), 2);
}

#[tokio::test]
async fn test_late_error_for_old_query_is_discarded() {
    let catalog = GatedCatalog::new();
    let first = catalog.gate_search("x");
    let second = catalog.gate_search("xy");
    let mut search = SearchController::new(catalog.clone());

    let old = search.set_query("x").unwrap();
    let new = search.set_query("xy").unwrap();

    first
        .send(Err(FetchError::NotFound("Too many results.".into())))
        .unwrap();
    old.await.unwrap();
    assert!(search.state().is_loading());

    second.send(Ok(results(&["XY"]))).unwrap();
    new.await.unwrap();
    assert_eq!(search.state().results().len(), 1);
}

#[tokio::test]
async fn test_clearing_query_while_in_flight() {
    let catalog = GatedCatalog::new();
    let gate = catalog.gate_search("alien");
    let mut search = SearchController::new(catalog.clone());

    let handle = search.set_query("alien").unwrap();
    assert!(search.set_query("").is_none());

    let state = search.state();
    assert!(!state.is_loading());
    assert!(state.results().is_empty());

    gate.send(Ok(results(&["Alien"]))).unwrap();
    handle.await.unwrap();

    assert_eq!(search.state(), LoadState::Ready(popcorn_core::SearchResults::empty()));
}

#[tokio::test]
async fn test_empty_query_skips_network() {
    let catalog = GatedCatalog::new();
    let mut search = SearchController::new(catalog.clone());

    assert!(search.set_query("").is_none());
    assert_eq!(catalog.calls(), 0);
    assert!(search.state().results().is_empty());
}

#[tokio::test]
async fn test_not_found_message() {
    let catalog = GatedCatalog::new();
    let gate = catalog.gate_search("qwertyuiop");
    let mut search = SearchController::new(catalog.clone());

    let handle = search.set_query("qwertyuiop").unwrap();
    gate.send(Err(FetchError::NotFound("Movie not found!".into())))
        .unwrap();
    handle.await.unwrap();

    assert_eq!(search.state().error(), Some("Movie not found!"));
    assert!(search.state().results().is_empty());
}

#[tokio::test]
async fn test_network_error_message() {
    let catalog = GatedCatalog::new();
    let gate = catalog.gate_search("dune");
    let mut search = SearchController::new(catalog.clone());

    let handle = search.set_query("dune").unwrap();
    gate.send(Err(FetchError::network("connection reset"))).unwrap();
    handle.await.unwrap();

    assert_eq!(
        search.state().error(),
        Some("An error occurred while fetching the data")
    );
}

#[tokio::test]
async fn test_cancelled_outcome_is_not_a_transition() {
    let catalog = GatedCatalog::new();
    let gate = catalog.gate_search("dune");
    let mut search = SearchController::new(catalog.clone());
    let mut updates = search.subscribe();

    let handle = search.set_query("dune").unwrap();
    let _ = updates.borrow_and_update();

    gate.send(Err(FetchError::Cancelled)).unwrap();
    handle.await.unwrap();

    assert!(!updates.has_changed().unwrap());
    assert!(search.state().is_loading());
}

#[tokio::test]
async fn test_error_is_cleared_by_next_query() {
    let catalog = GatedCatalog::new();
    let failing = catalog.gate_search("zzz");
    let mut search = SearchController::new(catalog.clone());

    let handle = search.set_query("zzz").unwrap();
    failing
        .send(Err(FetchError::NotFound("Movie not found!".into())))
        .unwrap();
    handle.await.unwrap();
    assert!(search.state().error().is_some());

    let _next = catalog.gate_search("zzz top");
    search.set_query("zzz top");
    assert_eq!(search.state(), LoadState::Loading);
}

#[tokio::test]
async fn test_whitespace_query_is_searched() {
    let catalog = GatedCatalog::new();
    let gate = catalog.gate_search("  ");
    let mut search = SearchController::new(catalog.clone());

    let handle = search.set_query("  ").unwrap();
    gate.send(Ok(results(&[]))).unwrap();
    handle.await.unwrap();

    assert_eq!(catalog.calls(), 1);
    assert_eq!(search.query(), "  ");
}

#[tokio::test]
async fn test_subscriber_sees_final_state() {
    let catalog = GatedCatalog::new();
    let first = catalog.gate_search("a");
    let second = catalog.gate_search("ab");
    let third = catalog.gate_search("abc");
    let mut search = SearchController::new(catalog.clone());
    let mut updates = search.subscribe();

    // Rapid keystrokes
    search.set_query("a");
    search.set_query("ab");
    search.set_query("abc");

    // Resolve in reverse order
    third.send(Ok(results(&["ABC"]))).unwrap();
    let _ = second.send(Ok(results(&["AB"])));
    let _ = first.send(Ok(results(&["A"])));

    let state = updates
        .wait_for(|s| s.is_settled())
        .await
        .unwrap()
        .clone();
    assert_eq!(state.results()[0].title, "ABC");

    tokio::task::yield_now().await;
    assert_eq!(search.state().results()[0].title, "ABC");
}
