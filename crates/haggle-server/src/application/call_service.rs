//! Call Lifecycle Service (Use Case)
//!
//! Submits batches of dealer calls to the calling agent and records
//! their outcomes when the agent reports back.

use std::sync::Arc;

use uuid::Uuid;

use haggle::{
    AgentCall, BestDeal, CallAgent, CallCompletion, CallRecord, CallRepository, CallRequest,
    CallStatus, DomainError, NewCallRecord,
};

/// Result of the best-effort insert for one submitted call
#[derive(Debug)]
pub enum PersistOutcome {
    Persisted,
    Failed(DomainError),
}

impl PersistOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, PersistOutcome::Persisted)
    }
}

/// One element of a submitted batch after enrichment
#[derive(Debug)]
pub struct SubmittedCall {
    pub call_id: String,
    pub best_deal: BestDeal,
    pub persistence: PersistOutcome,
}

/// A batch that reached the agent
#[derive(Debug)]
pub struct Submission {
    /// Agent response, passed through untouched
    pub agent_response: serde_json::Value,
    pub calls: Vec<SubmittedCall>,
}

/// What happened to a completion callback at the store
#[derive(Debug)]
pub enum CompletionOutcome {
    Recorded,
    UnknownCall,
    StoreFailed(DomainError),
}

/// Application service for the call lifecycle
pub struct CallService<R: CallRepository + ?Sized, A: CallAgent + ?Sized> {
    repo: Arc<R>,
    agent: Arc<A>,
}

impl<R: CallRepository + ?Sized, A: CallAgent + ?Sized> CallService<R, A> {
    pub fn new(repo: Arc<R>, agent: Arc<A>) -> Self {
        Self { repo, agent }
    }

    /// Submit a batch of calls to the agent.
    ///
    /// Validation is all-or-nothing and happens before any side effect.
    /// Best-deal lookups and inserts are best-effort; the agent hand-off is not.
    pub async fn submit(&self, batch: Vec<CallRequest>) -> Result<Submission, DomainError> {
        CallRequest::validate_batch(&batch)?;

        tracing::info!("Received {} call request(s)", batch.len());

        let mut outbound = Vec::with_capacity(batch.len());
        let mut calls = Vec::with_capacity(batch.len());

        for (index, request) in batch.into_iter().enumerate() {
            let call_id = Uuid::new_v4().to_string();
            let best_deal = self.lookup_best_deal(&request).await;
            let agent_call = AgentCall::new(&call_id, &request, best_deal);

            tracing::info!(
                "Generated call request {}: call_id={}, dealer={}, phone={}, model={} {}, dealing={}",
                index + 1,
                call_id,
                request.dealer_name,
                request.phone_number,
                request.model,
                request.year,
                best_deal.found
            );

            let persistence = match self.repo.create(&new_record(&call_id, request)).await {
                Ok(()) => PersistOutcome::Persisted,
                Err(e) => {
                    tracing::warn!("Failed to persist call {}: {}", call_id, e);
                    PersistOutcome::Failed(e)
                }
            };

            outbound.push(agent_call);
            calls.push(SubmittedCall {
                call_id,
                best_deal,
                persistence,
            });
        }

        let agent_response = self.agent.init_calls(&outbound).await.map_err(|e| {
            tracing::error!("Error calling agent service: {}", e);
            e
        })?;

        Ok(Submission {
            agent_response,
            calls,
        })
    }

    /// Record a completion callback from the agent.
    ///
    /// Only an empty correlation key is rejected. Unknown call ids and
    /// store failures are logged and reported in the outcome.
    pub async fn complete(&self, completion: CallCompletion) -> Result<CompletionOutcome, DomainError> {
        if completion.call_id.is_empty() {
            return Err(DomainError::Validation("user_id is required".to_string()));
        }

        tracing::info!(
            "Call finished - CallID: {}, IsAvailable: {}, DealPrice: {}, Remarks: {}",
            completion.call_id,
            completion.is_available,
            completion.deal_price,
            completion.remarks
        );

        let outcome = match self.repo.complete_by_call_id(&completion).await {
            Ok(()) => CompletionOutcome::Recorded,
            Err(e) if e.is_not_found() => {
                tracing::warn!("No call found with call_id {}", completion.call_id);
                CompletionOutcome::UnknownCall
            }
            Err(e) => {
                tracing::warn!("Failed to record completion for {}: {}", completion.call_id, e);
                CompletionOutcome::StoreFailed(e)
            }
        };

        Ok(outcome)
    }

    /// List calls, newest first
    pub async fn list_calls(&self, status: Option<CallStatus>) -> Result<Vec<CallRecord>, DomainError> {
        self.repo.list_all(status).await
    }

    /// Get the first call recorded for a user id
    pub async fn get_by_user_id(&self, user_id: &str) -> Result<CallRecord, DomainError> {
        self.repo.find_by_user_id(user_id).await
    }

    /// Lowest confirmed deal for an identical car
    pub async fn best_deal(&self, model: &str, year: i32, zipcode: &str) -> Result<BestDeal, DomainError> {
        self.repo.best_deal(model, year, zipcode).await
    }

    async fn lookup_best_deal(&self, request: &CallRequest) -> BestDeal {
        match self
            .repo
            .best_deal(&request.model, request.year, &request.zipcode)
            .await
        {
            Ok(deal) => deal,
            Err(e) => {
                tracing::warn!(
                    "Best deal lookup failed for {} {} in {}: {}",
                    request.model,
                    request.year,
                    request.zipcode,
                    e
                );
                BestDeal::none()
            }
        }
    }
}

fn new_record(call_id: &str, request: CallRequest) -> NewCallRecord {
    NewCallRecord {
        user_id: request.user_id,
        call_id: call_id.to_string(),
        model: request.model,
        year: request.year,
        zipcode: request.zipcode,
        dealer_name: request.dealer_name,
        phone_number: request.phone_number,
        msrp: request.msrp,
        listing_price: request.listing_price,
    }
}
