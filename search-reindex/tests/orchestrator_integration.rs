//! Integration tests for the reindex orchestrator.
//!
//! These tests use the real Orchestrator, selector and strategy parsing, with
//! mock entity indexers recording every call they receive.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use search_reindex::errors::ReindexError;
use search_reindex::indexer::EntityIndexer;
use search_reindex::orchestrator::{BatchRequest, Orchestrator};
use search_reindex::selector;
use search_reindex_repository::SearchIndexError;
use search_reindex_shared::{EntityType, IndexResult};
use tokio::sync::broadcast;
use tokio::time::timeout;

/// A strategy call received by a mock indexer.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    FromDate(EntityType, DateTime<Utc>, usize),
    All(EntityType, usize),
    ById(EntityType, i64, i64, usize),
}

type CallLog = Arc<Mutex<Vec<Call>>>;

enum Behaviour {
    Succeed(IndexResult),
    Fail,
    /// Trigger a shutdown, then never complete.
    Hang(broadcast::Sender<()>),
}

// Mock indexer for testing
struct MockIndexer {
    entity: EntityType,
    calls: CallLog,
    behaviour: Behaviour,
}

impl MockIndexer {
    fn boxed(entity: EntityType, calls: &CallLog, behaviour: Behaviour) -> Box<dyn EntityIndexer> {
        Box::new(Self {
            entity,
            calls: Arc::clone(calls),
            behaviour,
        })
    }

    async fn respond(&self, call: Call) -> Result<IndexResult, ReindexError> {
        self.calls.lock().unwrap().push(call);
        match &self.behaviour {
            Behaviour::Succeed(result) => Ok(result.clone()),
            Behaviour::Fail => Err(ReindexError::SearchIndexError(
                SearchIndexError::connection("connection refused"),
            )),
            Behaviour::Hang(shutdown_tx) => {
                let _ = shutdown_tx.send(());
                std::future::pending().await
            }
        }
    }
}

#[async_trait::async_trait]
impl EntityIndexer for MockIndexer {
    async fn from_date(
        &self,
        from: DateTime<Utc>,
        batch_size: usize,
    ) -> Result<IndexResult, ReindexError> {
        self.respond(Call::FromDate(self.entity, from, batch_size))
            .await
    }

    async fn all(&self, batch_size: usize) -> Result<IndexResult, ReindexError> {
        self.respond(Call::All(self.entity, batch_size)).await
    }

    async fn by_id(
        &self,
        from: i64,
        to: i64,
        batch_size: usize,
    ) -> Result<IndexResult, ReindexError> {
        self.respond(Call::ById(self.entity, from, to, batch_size))
            .await
    }
}

fn ok_result(successful: usize) -> Behaviour {
    Behaviour::Succeed(IndexResult {
        successful,
        ..Default::default()
    })
}

fn both_succeeding(calls: &CallLog) -> Orchestrator {
    Orchestrator::new(vec![
        (
            EntityType::Firm,
            MockIndexer::boxed(EntityType::Firm, calls, ok_result(3)),
        ),
        (
            EntityType::Person,
            MockIndexer::boxed(EntityType::Person, calls, ok_result(4)),
        ),
    ])
}

#[tokio::test]
async fn test_date_strategy_wins_over_all() {
    let calls = CallLog::default();
    let orchestrator = both_succeeding(&calls);
    let request =
        BatchRequest::from_flags(Some("2024-01-02T03:04:05Z"), true, 0, 100, 250).unwrap();

    let results = orchestrator.run(&request).await.unwrap();

    let from: DateTime<Utc> = "2024-01-02T03:04:05Z".parse().unwrap();
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            Call::FromDate(EntityType::Firm, from, 250),
            Call::FromDate(EntityType::Person, from, 250),
        ]
    );
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_all_strategy_without_date() {
    let calls = CallLog::default();
    let orchestrator = both_succeeding(&calls);
    let request = BatchRequest::from_flags(Some(""), true, 0, 100, 10_000).unwrap();

    orchestrator.run(&request).await.unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            Call::All(EntityType::Firm, 10_000),
            Call::All(EntityType::Person, 10_000),
        ]
    );
}

#[tokio::test]
async fn test_id_range_strategy_by_default() {
    let calls = CallLog::default();
    let orchestrator = both_succeeding(&calls);
    let request = BatchRequest::from_flags(None, false, 0, 100, 10_000).unwrap();

    let results = orchestrator.run(&request).await.unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            Call::ById(EntityType::Firm, 0, 100, 10_000),
            Call::ById(EntityType::Person, 0, 100, 10_000),
        ]
    );
    assert_eq!(results[0], (EntityType::Firm, IndexResult { successful: 3, ..Default::default() }));
    assert_eq!(results[1].1.successful, 4);
}

#[tokio::test]
async fn test_infrastructure_error_stops_remaining_types() {
    let calls = CallLog::default();
    let orchestrator = Orchestrator::new(vec![
        (
            EntityType::Firm,
            MockIndexer::boxed(EntityType::Firm, &calls, Behaviour::Fail),
        ),
        (
            EntityType::Person,
            MockIndexer::boxed(EntityType::Person, &calls, ok_result(4)),
        ),
    ]);
    let request = BatchRequest::All { batch_size: 100 };

    let result = orchestrator.run(&request).await;

    assert!(matches!(
        result,
        Err(ReindexError::SearchIndexError(SearchIndexError::ConnectionError(_)))
    ));
    assert_eq!(*calls.lock().unwrap(), vec![Call::All(EntityType::Firm, 100)]);
}

#[tokio::test]
async fn test_per_record_errors_do_not_stop_the_run() {
    let calls = CallLog::default();
    let failing = Behaviour::Succeed(IndexResult {
        successful: 7,
        failed: 2,
        errors: vec!["e1".to_string(), "e2".to_string()],
    });
    let orchestrator = Orchestrator::new(vec![
        (
            EntityType::Firm,
            MockIndexer::boxed(EntityType::Firm, &calls, failing),
        ),
        (
            EntityType::Person,
            MockIndexer::boxed(EntityType::Person, &calls, ok_result(1)),
        ),
    ]);

    let results = orchestrator
        .run(&BatchRequest::All { batch_size: 10 })
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].1.failed, 2);
    assert_eq!(results[0].1.errors, vec!["e1", "e2"]);
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_shutdown_cancels_in_flight_type() {
    let calls = CallLog::default();
    let (shutdown_tx, _) = broadcast::channel(1);
    let orchestrator = Orchestrator::with_shutdown(
        vec![
            (
                EntityType::Firm,
                MockIndexer::boxed(
                    EntityType::Firm,
                    &calls,
                    Behaviour::Hang(shutdown_tx.clone()),
                ),
            ),
            (
                EntityType::Person,
                MockIndexer::boxed(EntityType::Person, &calls, ok_result(1)),
            ),
        ],
        shutdown_tx,
    );

    let result = timeout(
        Duration::from_secs(5),
        orchestrator.run(&BatchRequest::All { batch_size: 10 }),
    )
    .await
    .expect("orchestrator should stop after shutdown");

    assert!(matches!(result, Err(ReindexError::Cancelled)));
    assert_eq!(*calls.lock().unwrap(), vec![Call::All(EntityType::Firm, 10)]);
}

#[tokio::test]
async fn test_no_selected_indexers_is_a_no_op() {
    let orchestrator = Orchestrator::new(Vec::new());
    let results = orchestrator
        .run(&BatchRequest::All { batch_size: 10 })
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_selector_feeds_orchestrator() {
    let calls = CallLog::default();
    let deployed = vec!["person_11223344".to_string()];

    let indexers = selector::select(&[], &deployed, |entity, _index_name| {
        MockIndexer::boxed(entity, &calls, ok_result(1))
    });
    let orchestrator = Orchestrator::new(indexers);
    assert_eq!(orchestrator.entities(), vec![EntityType::Person]);

    orchestrator
        .run(&BatchRequest::ById {
            from: 5,
            to: 6,
            batch_size: 1,
        })
        .await
        .unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec![Call::ById(EntityType::Person, 5, 6, 1)]
    );
}
