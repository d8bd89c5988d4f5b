use crate::domain::value::{KnownStatusCode, StatusCode};

/// Result of a text or binary send call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSendResponse {
    pub client_message_id: Option<String>,
    pub sms_count: u32,
    pub status_code: StatusCode,
    pub status_message: String,
    pub transfer_id: Option<String>,
}

/// Acknowledgement body a webhook endpoint returns to the vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status_code: StatusCode,
    pub status_message: String,
}

impl WebhookResponse {
    pub fn new(status_code: impl Into<StatusCode>, status_message: impl Into<String>) -> Self {
        Self {
            status_code: status_code.into(),
            status_message: status_message.into(),
        }
    }

    /// `2000 ok`, telling the vendor the notification was accepted.
    pub fn ok() -> Self {
        Self::new(KnownStatusCode::Ok, "ok")
    }
}
