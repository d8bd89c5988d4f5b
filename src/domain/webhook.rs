//! Inbound webhook notifications.

use chrono::{DateTime, FixedOffset};

use crate::domain::segment::{self, SegmentError};

/// Value of the `messageType` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookMessageType {
    Text,
    Binary,
    DeliveryReport,
}

impl WebhookMessageType {
    /// Discriminator string as sent by the vendor.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Binary => "binary",
            Self::DeliveryReport => "deliveryReport",
        }
    }
}

/// Number format of an inbound sender or recipient address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressType {
    International,
    National,
    Shortcode,
    Alphanumeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryReportMessageStatus {
    Delivered,
    Undelivered,
    Expired,
    Deleted,
    Accepted,
    Rejected,
}

/// Channel a message was finally delivered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveredAs {
    Sms,
    Push,
    /// Serialized as `failover-sms`.
    FailoverSms,
    Voice,
}

/// Mobile originated text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNotification {
    pub notification_id: String,
    pub sender_address: String,
    pub sender_address_type: AddressType,
    pub recipient_address: String,
    pub recipient_address_type: AddressType,
    pub message_flash_sms: bool,
    /// Full UTF-8 text; concatenated messages arrive already joined.
    pub text_message_content: String,
}

/// Mobile originated binary message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryNotification {
    pub notification_id: String,
    pub sender_address: String,
    pub sender_address_type: AddressType,
    pub recipient_address: String,
    pub recipient_address_type: AddressType,
    pub message_flash_sms: bool,
    pub user_data_header_present: bool,
    /// Base64 segments in transmission order.
    pub binary_message_content: Vec<String>,
}

impl BinaryNotification {
    /// Decode the segments into text, stripping user data headers when present.
    pub fn decode_text(&self) -> Result<String, SegmentError> {
        segment::decode_segments(&self.binary_message_content, self.user_data_header_present)
    }
}

/// Delivery status for a previously sent message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReportNotification {
    pub notification_id: String,
    pub sender_address: String,
    /// Links the report to the `transferId` of the send response.
    pub transfer_id: String,
    pub delivery_report_message_status: DeliveryReportMessageStatus,
    pub sent_on: DateTime<FixedOffset>,
    pub delivered_on: DateTime<FixedOffset>,
    pub delivered_as: Option<DeliveredAs>,
    pub client_message_id: String,
}

/// One inbound webhook notification.
///
/// The set of variants is closed: matching on it (directly or through
/// [`WebhookNotification::map`] / [`WebhookNotification::handle`]) is exhaustive,
/// so a new variant is a compile error at every consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookNotification {
    Text(TextNotification),
    Binary(BinaryNotification),
    DeliveryReport(DeliveryReportNotification),
}

impl WebhookNotification {
    pub fn message_type(&self) -> WebhookMessageType {
        match self {
            Self::Text(_) => WebhookMessageType::Text,
            Self::Binary(_) => WebhookMessageType::Binary,
            Self::DeliveryReport(_) => WebhookMessageType::DeliveryReport,
        }
    }

    pub fn notification_id(&self) -> &str {
        match self {
            Self::Text(text) => &text.notification_id,
            Self::Binary(binary) => &binary.notification_id,
            Self::DeliveryReport(report) => &report.notification_id,
        }
    }

    pub fn sender_address(&self) -> &str {
        match self {
            Self::Text(text) => &text.sender_address,
            Self::Binary(binary) => &binary.sender_address,
            Self::DeliveryReport(report) => &report.sender_address,
        }
    }

    /// Run the handler matching this variant and return its result.
    ///
    /// Exactly one handler is called.
    pub fn map<T>(
        &self,
        on_text: impl FnOnce(&TextNotification) -> T,
        on_binary: impl FnOnce(&BinaryNotification) -> T,
        on_delivery_report: impl FnOnce(&DeliveryReportNotification) -> T,
    ) -> T {
        match self {
            Self::Text(text) => on_text(text),
            Self::Binary(binary) => on_binary(binary),
            Self::DeliveryReport(report) => on_delivery_report(report),
        }
    }

    /// Effect-only form of [`WebhookNotification::map`].
    pub fn handle(
        &self,
        on_text: impl FnOnce(&TextNotification),
        on_binary: impl FnOnce(&BinaryNotification),
        on_delivery_report: impl FnOnce(&DeliveryReportNotification),
    ) {
        self.map(on_text, on_binary, on_delivery_report)
    }
}

impl From<TextNotification> for WebhookNotification {
    fn from(value: TextNotification) -> Self {
        Self::Text(value)
    }
}

impl From<BinaryNotification> for WebhookNotification {
    fn from(value: BinaryNotification) -> Self {
        Self::Binary(value)
    }
}

impl From<DeliveryReportNotification> for WebhookNotification {
    fn from(value: DeliveryReportNotification) -> Self {
        Self::DeliveryReport(value)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use base64::Engine as _;

    use super::*;

    fn text() -> WebhookNotification {
        TextNotification {
            notification_id: "02c1d0051949fe70cbfa".to_owned(),
            sender_address: "4367612345678".to_owned(),
            sender_address_type: AddressType::International,
            recipient_address: "08282709900001".to_owned(),
            recipient_address_type: AddressType::National,
            message_flash_sms: false,
            text_message_content: "Hello".to_owned(),
        }
        .into()
    }

    fn binary(segments: Vec<String>) -> BinaryNotification {
        BinaryNotification {
            notification_id: "n-2".to_owned(),
            sender_address: "4367612345678".to_owned(),
            sender_address_type: AddressType::International,
            recipient_address: "0828".to_owned(),
            recipient_address_type: AddressType::Shortcode,
            message_flash_sms: true,
            user_data_header_present: true,
            binary_message_content: segments,
        }
    }

    #[test]
    fn common_accessors_read_through_variants() {
        let notification = text();
        assert_eq!(notification.message_type(), WebhookMessageType::Text);
        assert_eq!(notification.notification_id(), "02c1d0051949fe70cbfa");
        assert_eq!(notification.sender_address(), "4367612345678");
        assert_eq!(WebhookMessageType::DeliveryReport.as_str(), "deliveryReport");
    }

    #[test]
    fn map_invokes_only_the_matching_handler() {
        let calls = RefCell::new(Vec::new());
        let notification = text();

        let result = notification.map(
            |text| {
                calls.borrow_mut().push("text");
                text.text_message_content.clone()
            },
            |_| {
                calls.borrow_mut().push("binary");
                String::new()
            },
            |_| {
                calls.borrow_mut().push("deliveryReport");
                String::new()
            },
        );

        assert_eq!(result, "Hello");
        assert_eq!(*calls.borrow(), vec!["text"]);
    }

    #[test]
    fn handle_runs_effect_for_binary_only() {
        let segments = crate::domain::segment::encode_segments(&["bin", "ary"]).unwrap();
        let notification = WebhookNotification::from(binary(segments));

        let mut seen = Vec::new();
        let mut decoded = None;
        notification.handle(
            |_| seen.push("text"),
            |binary| decoded = Some(binary.decode_text().unwrap()),
            |_| panic!("delivery report handler must not run"),
        );

        assert!(seen.is_empty());
        assert_eq!(decoded.as_deref(), Some("binary"));
    }

    #[test]
    fn binary_decode_text_surfaces_segment_errors() {
        let bad = base64::engine::general_purpose::STANDARD.encode([0x20, 0x00]);
        let err = binary(vec![bad]).decode_text().unwrap_err();
        assert!(matches!(err, SegmentError::HeaderOutOfBounds { .. }));
    }
}
