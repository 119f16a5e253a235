//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - CallRecord: Persisted negotiation call attempt
//! - CallRequest: One requested call in a submission batch
//! - AgentCall: Enriched call forwarded to the calling agent

mod agent_call;
mod call_record;
mod call_request;

pub use agent_call::*;
pub use call_record::*;
pub use call_request::*;
