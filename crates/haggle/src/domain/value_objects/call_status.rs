//! CallStatus - Lifecycle state of a negotiation call

use serde::{Deserialize, Serialize};

/// Call status
///
/// Starts at `Pending` and moves once, on the completion callback, to
/// `Completed` (dealer has the car) or `Failed` (dealer does not).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl CallStatus {
    /// Status reached after a completion callback
    pub fn from_availability(is_available: bool) -> Self {
        if is_available {
            CallStatus::Completed
        } else {
            CallStatus::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Pending => "pending",
            CallStatus::Completed => "completed",
            CallStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CallStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(CallStatus::Pending),
            "completed" => Ok(CallStatus::Completed),
            "failed" => Ok(CallStatus::Failed),
            _ => Err(format!("Unknown call status: {}", s)),
        }
    }
}
