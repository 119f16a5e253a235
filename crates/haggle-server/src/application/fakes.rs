//! In-memory port implementations for tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use haggle::{
    AgentCall, BestDeal, CallAgent, CallCompletion, CallRecord, CallRepository, CallStatus,
    DomainError, ListingQuery, ListingSearch, NewCallRecord,
};

/// CallRepository backed by a Vec, with switchable failures
#[derive(Default)]
pub struct InMemoryCallRepository {
    records: Mutex<Vec<CallRecord>>,
    fail_writes: AtomicBool,
    fail_best_deal: AtomicBool,
}

impl InMemoryCallRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_best_deal(&self, fail: bool) {
        self.fail_best_deal.store(fail, Ordering::SeqCst);
    }

    /// Snapshot in insertion order
    pub fn records(&self) -> Vec<CallRecord> {
        self.records.lock().unwrap().clone()
    }

    fn check_writes(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Repository("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CallRepository for InMemoryCallRepository {
    async fn create(&self, record: &NewCallRecord) -> Result<(), DomainError> {
        self.check_writes()?;
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.call_id == record.call_id) {
            return Err(DomainError::Repository(format!(
                "duplicate call_id {}",
                record.call_id
            )));
        }
        let id = records.len() as i64 + 1;
        records.push(CallRecord::pending(id, record.clone()));
        Ok(())
    }

    async fn complete_by_call_id(&self, completion: &CallCompletion) -> Result<(), DomainError> {
        self.check_writes()?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.call_id == completion.call_id)
            .ok_or_else(|| DomainError::not_found("Call", &completion.call_id))?;
        record.complete(completion);
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<CallRecord, DomainError> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .min_by_key(|r| r.id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Call for user", user_id))
    }

    async fn list_all(&self, status: Option<CallStatus>) -> Result<Vec<CallRecord>, DomainError> {
        let mut records: Vec<CallRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    async fn best_deal(
        &self,
        model: &str,
        year: i32,
        zipcode: &str,
    ) -> Result<BestDeal, DomainError> {
        if self.fail_best_deal.load(Ordering::SeqCst) {
            return Err(DomainError::timeout("best deal lookup", std::time::Duration::from_secs(5)));
        }
        let price = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.matches_car(model, year, zipcode) && r.is_confirmed_deal())
            .filter_map(|r| r.deal_price)
            .min();
        Ok(BestDeal::from(price))
    }
}

/// CallAgent that records every batch it is handed
pub struct RecordingAgent {
    batches: Mutex<Vec<Vec<AgentCall>>>,
    response: serde_json::Value,
    failure: Option<String>,
}

impl RecordingAgent {
    pub fn new() -> Self {
        Self::with_response(serde_json::json!({"status": "ok"}))
    }

    pub fn with_response(response: serde_json::Value) -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            response,
            failure: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    pub fn batches(&self) -> Vec<Vec<AgentCall>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl CallAgent for RecordingAgent {
    async fn init_calls(&self, calls: &[AgentCall]) -> Result<serde_json::Value, DomainError> {
        self.batches.lock().unwrap().push(calls.to_vec());
        match &self.failure {
            Some(message) => Err(DomainError::ExternalService(message.clone())),
            None => Ok(self.response.clone()),
        }
    }
}

/// ListingSearch returning a canned payload or a canned upstream error
pub struct StaticListings {
    queries: Mutex<Vec<ListingQuery>>,
    result: Result<serde_json::Value, String>,
}

impl StaticListings {
    pub fn returning(payload: serde_json::Value) -> Self {
        Self {
            queries: Mutex::new(Vec::new()),
            result: Ok(payload),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            queries: Mutex::new(Vec::new()),
            result: Err(message.to_string()),
        }
    }

    pub fn queries(&self) -> Vec<ListingQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListingSearch for StaticListings {
    async fn search(&self, query: &ListingQuery) -> Result<serde_json::Value, DomainError> {
        self.queries.lock().unwrap().push(query.clone());
        self.result
            .clone()
            .map_err(DomainError::ExternalService)
    }
}
