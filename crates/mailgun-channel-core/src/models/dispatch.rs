/// Outcome of a single dispatch
use super::status::CommunicationsStatus;
use crate::error::DispatchFailure;

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult {
    pub status: CommunicationsStatus,
    /// Mailgun message id, only on success
    pub resource_id: Option<String>,
    /// Provider failure, only on non-success responses
    pub failure: Option<DispatchFailure>,
}

impl DispatchResult {
    pub fn is_success(&self) -> bool {
        self.failure.is_none() && self.status.is_success()
    }
}
