use tracing::{error, info, warn};

use crate::error::UpstreamError;
use crate::message::ChatResponse;
use crate::services::upstream::UpstreamClient;

pub const FALLBACK_REJECTED: &str = "I'm learning fast! Try again! ⚡";
pub const FALLBACK_FAILED: &str = "MAXIM AI is optimizing! Ask me anything! 🔧";

/// Result of relaying one message upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    Answered(String),
    /// Upstream replied with a non-200 status.
    UpstreamRejected,
    /// Transport failure or an unusable body.
    Failed,
}

impl RelayOutcome {
    pub fn from_result(result: Result<String, UpstreamError>) -> Self {
        match result {
            Ok(reply) => {
                info!("🤖 Response: {}", reply);
                RelayOutcome::Answered(reply)
            }
            Err(UpstreamError::Status { status, body }) => {
                warn!("❌ API Error: {} - {}", status, body);
                RelayOutcome::UpstreamRejected
            }
            Err(e) => {
                error!("❌ Error: {}", e);
                RelayOutcome::Failed
            }
        }
    }

    pub fn into_response(self) -> ChatResponse {
        match self {
            RelayOutcome::Answered(reply) => ChatResponse { success: true, reply },
            RelayOutcome::UpstreamRejected => ChatResponse {
                success: false,
                reply: FALLBACK_REJECTED.to_string(),
            },
            RelayOutcome::Failed => ChatResponse {
                success: false,
                reply: FALLBACK_FAILED.to_string(),
            },
        }
    }
}

pub async fn relay_message(client: &UpstreamClient, message: &str) -> RelayOutcome {
    RelayOutcome::from_result(client.complete(message).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answered_reply_is_passed_through() {
        let resp = RelayOutcome::Answered("hi there".to_string()).into_response();
        assert_eq!(resp, ChatResponse { success: true, reply: "hi there".to_string() });
    }

    #[test]
    fn status_error_maps_to_rejected_fallback() {
        let outcome = RelayOutcome::from_result(Err(UpstreamError::Status {
            status: 429,
            body: "rate limited".to_string(),
        }));
        assert_eq!(outcome, RelayOutcome::UpstreamRejected);

        let resp = outcome.into_response();
        assert!(!resp.success);
        assert_eq!(resp.reply, FALLBACK_REJECTED);
    }

    #[test]
    fn malformed_body_maps_to_failed_fallback() {
        let outcome =
            RelayOutcome::from_result(Err(UpstreamError::MalformedBody("no choices".to_string())));
        assert_eq!(outcome, RelayOutcome::Failed);
        assert_eq!(outcome.into_response().reply, FALLBACK_FAILED);
    }
}
