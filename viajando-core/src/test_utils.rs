//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::services::TripService;
use crate::traits::{InMemoryTripStore, TripStore};
use crate::types::{Platform, Trip, TripDraft, WriteOutcome};

/// Web-platform service over an empty memory store with sequential ids (1, 2, ...).
pub fn create_test_trip_service() -> (TripService, Arc<InMemoryTripStore>) {
    let counter = Arc::new(AtomicI64::new(1));
    let store = Arc::new(
        InMemoryTripStore::new().with_id_source(move || counter.fetch_add(1, Ordering::SeqCst)),
    );
    let svc = TripService::new(store.clone(), Platform::Web);
    (svc, store)
}

// ===== SlowInitTripStore =====

/// Counts `initialize` calls; each call yields to the runtime before returning.
pub struct SlowInitTripStore {
    init_calls: AtomicUsize,
}

impl SlowInitTripStore {
    pub fn new() -> Self {
        Self {
            init_calls: AtomicUsize::new(0),
        }
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TripStore for SlowInitTripStore {
    fn backend_name(&self) -> &'static str {
        "slow"
    }

    async fn initialize(&self) -> CoreResult<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(())
    }

    async fn find_all(&self) -> CoreResult<Vec<Trip>> {
        Ok(Vec::new())
    }

    async fn insert(&self, draft: &TripDraft) -> CoreResult<Trip> {
        Ok(Trip::from_draft(1, draft))
    }

    async fn update(&self, _id: i64, _draft: &TripDraft) -> CoreResult<WriteOutcome> {
        Ok(WriteOutcome::NoOp)
    }

    async fn delete(&self, _id: i64) -> CoreResult<WriteOutcome> {
        Ok(WriteOutcome::NoOp)
    }
}

// ===== FailingTripStore =====

/// Simulates a durable backend whose connection or queries fail.
///
/// `initialize` sleeps briefly so concurrent callers overlap.
pub struct FailingTripStore {
    fail_init: AtomicBool,
    fail_queries: bool,
    init_calls: AtomicUsize,
}

impl FailingTripStore {
    /// `initialize` fails until `set_fail_init(false)`
    pub fn failing_init() -> Self {
        Self {
            fail_init: AtomicBool::new(true),
            fail_queries: false,
            init_calls: AtomicUsize::new(0),
        }
    }

    /// `initialize` succeeds, every query fails
    pub fn failing_queries() -> Self {
        Self {
            fail_init: AtomicBool::new(false),
            fail_queries: true,
            init_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_fail_init(&self, fail: bool) {
        self.fail_init.store(fail, Ordering::SeqCst);
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    fn check_query(&self) -> CoreResult<()> {
        if self.fail_queries {
            return Err(CoreError::StorageQuery("database is locked".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TripStore for FailingTripStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn initialize(&self) -> CoreResult<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(CoreError::StorageInit(
                "unable to open database file".to_string(),
            ));
        }
        Ok(())
    }

    async fn find_all(&self) -> CoreResult<Vec<Trip>> {
        self.check_query()?;
        Ok(Vec::new())
    }

    async fn insert(&self, draft: &TripDraft) -> CoreResult<Trip> {
        self.check_query()?;
        Ok(Trip::from_draft(1, draft))
    }

    async fn update(&self, _id: i64, _draft: &TripDraft) -> CoreResult<WriteOutcome> {
        self.check_query()?;
        Ok(WriteOutcome::NoOp)
    }

    async fn delete(&self, _id: i64) -> CoreResult<WriteOutcome> {
        self.check_query()?;
        Ok(WriteOutcome::NoOp)
    }
}
