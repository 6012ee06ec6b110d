use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use tokio::sync::oneshot;

use bookfinder::{
    controller::{DetailController, DetailState, SearchController, SearchState},
    error::{CatalogError, NavigationError},
    query,
    traits::CatalogService,
    types::{book::BookRecord, key::BookKey, result_set::ResultSet},
};

type Gate = oneshot::Sender<Result<ResultSet, CatalogError>>;

/// Searches block until the test releases them through their [`Gate`].
#[derive(Default)]
struct FakeCatalog {
    searches: Mutex<HashMap<String, oneshot::Receiver<Result<ResultSet, CatalogError>>>>,
    books:    Vec<BookRecord>,
    broken:   bool,
}

impl FakeCatalog {
    fn gate(&self, input: &str) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.searches
            .lock()
            .unwrap()
            .insert(query::build(input), rx);
        tx
    }
}

fn unavailable() -> CatalogError {
    CatalogError::Status {
        url:    "http://catalog.invalid/search.json".into(),
        status: StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl CatalogService for FakeCatalog {
    async fn search(&self, query: &str) -> Result<ResultSet, CatalogError> {
        let gate = self.searches.lock().unwrap().remove(query);
        match gate {
            Some(gate) => gate.await.unwrap_or_else(|_| Err(unavailable())),
            None => Ok(ResultSet::default()),
        }
    }

    async fn lookup(&self, key: &str) -> Result<BookRecord, CatalogError> {
        if self.broken {
            return Err(unavailable());
        }
        Ok(self
            .books
            .iter()
            .find(|x| x.key.as_deref() == Some(key))
            .cloned()
            .unwrap_or_else(BookRecord::not_found))
    }
}

fn book(key: &str, title: &str) -> BookRecord {
    BookRecord {
        key: Some(key.into()),
        title: Some(title.into()),
        authors: vec!["J.R.R. Tolkien".into()],
        ..BookRecord::default()
    }
}

fn results(titles: &[&str]) -> ResultSet {
    ResultSet(
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| book(&format!("/works/OL{i}W"), title))
            .collect(),
    )
}

#[tokio::test]
async fn search_goes_through_searching_to_results() {
    let catalog = Arc::new(FakeCatalog::default());
    let gate = catalog.gate("tolkien hobbit");
    let controller = SearchController::new(Arc::clone(&catalog));
    assert_eq!(controller.state(), SearchState::Idle);

    let pending = controller.submit("tolkien   hobbit");
    assert_eq!(
        controller.state(),
        SearchState::Searching {
            query: "tolkien+hobbit&page=1&limit=10".into()
        }
    );

    gate.send(Ok(results(&["The Hobbit"]))).unwrap();
    pending.await.unwrap();
    let state = controller.state();
    let found = state.results().unwrap();
    assert!(found
        .iter()
        .any(|x| x.title.as_deref().unwrap_or_default().contains("Hobbit")));
}

#[tokio::test]
async fn zero_matches_is_empty() {
    let catalog = Arc::new(FakeCatalog::default());
    let controller = SearchController::new(catalog);
    assert_eq!(controller.search("nothing here").await, SearchState::Empty);
    assert_eq!(controller.state(), SearchState::Empty);
}

#[tokio::test]
async fn failure_is_distinct_from_empty() {
    let catalog = Arc::new(FakeCatalog::default());
    let gate = catalog.gate("dune");
    let controller = SearchController::new(Arc::clone(&catalog));

    let pending = controller.submit("dune");
    gate.send(Err(unavailable())).unwrap();
    pending.await.unwrap();

    match controller.state() {
        SearchState::Failed(reason) => assert!(reason.contains("503"), "{reason}"),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn stale_response_never_replaces_newer_results() {
    let catalog = Arc::new(FakeCatalog::default());
    let first_gate = catalog.gate("first");
    let second_gate = catalog.gate("second");
    let controller = SearchController::new(Arc::clone(&catalog));

    let first = controller.submit("first");
    let second = controller.submit("second");

    second_gate.send(Ok(results(&["Second"]))).unwrap();
    second.await.unwrap();
    assert_eq!(controller.state(), SearchState::Results(results(&["Second"])));

    first_gate.send(Ok(results(&["First"]))).unwrap();
    // The stale search still reports what it got, it just doesn't publish it.
    assert_eq!(
        first.await.unwrap(),
        SearchState::Results(results(&["First"]))
    );
    assert_eq!(controller.state(), SearchState::Results(results(&["Second"])));
}

#[tokio::test]
async fn stale_response_does_not_end_a_newer_search() {
    let catalog = Arc::new(FakeCatalog::default());
    let first_gate = catalog.gate("first");
    let _second_gate = catalog.gate("second");
    let controller = SearchController::new(Arc::clone(&catalog));

    let first = controller.submit("first");
    let _second = controller.submit("second");

    first_gate.send(Ok(results(&["First"]))).unwrap();
    first.await.unwrap();
    assert_eq!(
        controller.state(),
        SearchState::Searching {
            query: query::build("second")
        }
    );
}

#[tokio::test]
async fn subscribers_see_published_results() {
    let catalog = Arc::new(FakeCatalog::default());
    let gate = catalog.gate("hobbit");
    let controller = SearchController::new(Arc::clone(&catalog));
    let mut view = controller.subscribe();

    let pending = controller.submit("hobbit");
    view.changed().await.unwrap();
    assert!(matches!(*view.borrow(), SearchState::Searching { .. }));

    gate.send(Ok(results(&["The Hobbit"]))).unwrap();
    view.changed().await.unwrap();
    assert_eq!(*view.borrow(), SearchState::Results(results(&["The Hobbit"])));
    pending.await.unwrap();
}

#[tokio::test]
async fn dismissed_view_is_harmless() {
    let catalog = Arc::new(FakeCatalog::default());
    let gate = catalog.gate("hobbit");
    let controller = SearchController::new(Arc::clone(&catalog));
    let view = controller.subscribe();

    let pending = controller.submit("hobbit");
    drop(view);
    drop(controller);

    gate.send(Ok(results(&["The Hobbit"]))).unwrap();
    assert_eq!(
        pending.await.unwrap(),
        SearchState::Results(results(&["The Hobbit"]))
    );
}

#[tokio::test]
async fn selecting_a_result_opens_its_details() {
    let catalog = Arc::new(FakeCatalog {
        books: vec![book("/works/OL12345W", "The Hobbit")],
        ..FakeCatalog::default()
    });
    let list = ResultSet(vec![book("/works/OL12345W", "The Hobbit")]);

    let key = BookKey::select(&list, 1).unwrap();
    let detail = DetailController::new(Arc::clone(&catalog), key);
    assert_eq!(detail.state(), DetailState::Loading);

    match detail.spawn_load().await.unwrap() {
        DetailState::Loaded(record) => {
            assert_eq!(record.key.as_deref(), Some("/works/OL12345W"))
        }
        other => panic!("expected a book, got {other:?}"),
    }
    assert!(matches!(detail.state(), DetailState::Loaded(_)));
}

#[tokio::test]
async fn unknown_key_is_not_found() {
    let catalog = Arc::new(FakeCatalog::default());
    let detail = DetailController::new(catalog, BookKey::parse("/works/OL0W").unwrap());
    assert_eq!(detail.load().await, DetailState::NotFound);
}

#[tokio::test]
async fn failed_lookup_does_not_crash() {
    let catalog = Arc::new(FakeCatalog {
        broken: true,
        ..FakeCatalog::default()
    });
    let detail = DetailController::new(catalog, BookKey::parse("/works/OL1W").unwrap());
    assert!(matches!(detail.load().await, DetailState::Failed(_)));
}

#[test]
fn records_without_key_cannot_be_opened() {
    let list = ResultSet(vec![BookRecord {
        title: Some("Anonymous".into()),
        ..BookRecord::default()
    }]);
    assert_eq!(BookKey::select(&list, 1), Err(NavigationError::MissingKey));
}
