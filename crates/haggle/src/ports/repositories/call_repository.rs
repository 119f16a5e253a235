//! Call Repository Port
//!
//! Abstract interface for CallRecord persistence and the best-deal aggregate.

use async_trait::async_trait;

use crate::domain::{
    errors::DomainError, BestDeal, CallCompletion, CallRecord, CallStatus, NewCallRecord,
};

/// Repository interface for CallRecord entities.
///
/// Implementations bound every operation with a timeout and report it as
/// `DomainError::Timeout`.
#[async_trait]
pub trait CallRepository: Send + Sync {
    /// Insert a pending record
    async fn create(&self, record: &NewCallRecord) -> Result<(), DomainError>;

    /// Record the call outcome. `NotFound` if no record has this call id.
    async fn complete_by_call_id(&self, completion: &CallCompletion) -> Result<(), DomainError>;

    /// First record for a user id
    async fn find_by_user_id(&self, user_id: &str) -> Result<CallRecord, DomainError>;

    /// All records, newest first, optionally filtered by status
    async fn list_all(&self, status: Option<CallStatus>) -> Result<Vec<CallRecord>, DomainError>;

    /// Lowest confirmed deal price for an identical car
    async fn best_deal(
        &self,
        model: &str,
        year: i32,
        zipcode: &str,
    ) -> Result<BestDeal, DomainError>;
}
