//! Inbound webhook handling: parse vendor notifications and build the acknowledgement.
//!
//! ```rust
//! use websms::webhook;
//!
//! let body = r#"{
//!     "messageType": "text",
//!     "notificationId": "02c1d0051949fe70cbfa",
//!     "senderAddress": "4367612345678",
//!     "senderAddressType": "international",
//!     "recipientAddress": "08282709900001",
//!     "recipientAddressType": "national",
//!     "textMessageContent": "Hello"
//! }"#;
//!
//! let notification = webhook::parse(body)?;
//! let summary = notification.map(
//!     |text| format!("text: {}", text.text_message_content),
//!     |binary| format!("binary: {} segments", binary.binary_message_content.len()),
//!     |report| format!("report for {}", report.transfer_id),
//! );
//! assert_eq!(summary, "text: Hello");
//! # Ok::<(), websms::webhook::WebhookError>(())
//! ```

use std::io;
use std::str::FromStr;

use serde_json::Value;

use crate::domain::{WebhookNotification, WebhookResponse};

#[derive(Debug, thiserror::Error)]
/// Reasons a webhook payload could not be turned into a [`WebhookNotification`].
///
/// Every error is terminal for the payload: nothing is defaulted or partially returned.
pub enum WebhookError {
    /// The payload has no `messageType` field.
    #[error("missing messageType field")]
    MissingDiscriminator,

    /// `messageType` is not one of `text`, `binary`, `deliveryReport`.
    #[error("unknown messageType: {0}")]
    UnknownVariant(String),

    /// Not a JSON object, or the selected variant's fields are missing or mistyped.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// A notification or acknowledgement could not be serialized.
    #[error("serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Parse a webhook request body.
pub fn parse(json: &str) -> Result<WebhookNotification, WebhookError> {
    let value: Value = serde_json::from_str(json)?;
    decode(value)
}

/// Parse a webhook request body given as raw bytes.
pub fn parse_slice(bytes: &[u8]) -> Result<WebhookNotification, WebhookError> {
    let value: Value = serde_json::from_slice(bytes)?;
    decode(value)
}

/// Parse a webhook request body from a reader, consuming it to the end.
pub fn parse_reader<R: io::Read>(reader: R) -> Result<WebhookNotification, WebhookError> {
    let value: Value = serde_json::from_reader(reader)?;
    decode(value)
}

/// Serialize a notification back into the vendor's JSON shape.
pub fn to_json(notification: &WebhookNotification) -> Result<String, WebhookError> {
    crate::transport::encode_webhook_json(notification)
}

/// Serialize the acknowledgement returned from the webhook endpoint.
pub fn response_json(response: &WebhookResponse) -> Result<String, WebhookError> {
    crate::transport::encode_webhook_response_json(response)
}

fn decode(value: Value) -> Result<WebhookNotification, WebhookError> {
    match crate::transport::decode_webhook_value(value) {
        Ok(notification) => {
            tracing::debug!(
                message_type = notification.message_type().as_str(),
                notification_id = notification.notification_id(),
                "parsed webhook notification"
            );
            Ok(notification)
        }
        Err(err) => {
            tracing::warn!(error = %err, "rejected webhook payload");
            Err(err)
        }
    }
}

impl FromStr for WebhookNotification {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
