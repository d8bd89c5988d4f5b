use chrono::{DateTime, FixedOffset};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    AddressType, BinaryNotification, DeliveredAs, DeliveryReportMessageStatus,
    DeliveryReportNotification, TextNotification, WebhookMessageType, WebhookNotification,
    WebhookResponse,
};
use crate::webhook::WebhookError;

const DISCRIMINATOR: &str = "messageType";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum TransportAddressType {
    International,
    National,
    Shortcode,
    Alphanumeric,
}

impl From<TransportAddressType> for AddressType {
    fn from(value: TransportAddressType) -> Self {
        match value {
            TransportAddressType::International => Self::International,
            TransportAddressType::National => Self::National,
            TransportAddressType::Shortcode => Self::Shortcode,
            TransportAddressType::Alphanumeric => Self::Alphanumeric,
        }
    }
}

impl From<AddressType> for TransportAddressType {
    fn from(value: AddressType) -> Self {
        match value {
            AddressType::International => Self::International,
            AddressType::National => Self::National,
            AddressType::Shortcode => Self::Shortcode,
            AddressType::Alphanumeric => Self::Alphanumeric,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum TransportDeliveryStatus {
    Delivered,
    Undelivered,
    Expired,
    Deleted,
    Accepted,
    Rejected,
}

impl From<TransportDeliveryStatus> for DeliveryReportMessageStatus {
    fn from(value: TransportDeliveryStatus) -> Self {
        match value {
            TransportDeliveryStatus::Delivered => Self::Delivered,
            TransportDeliveryStatus::Undelivered => Self::Undelivered,
            TransportDeliveryStatus::Expired => Self::Expired,
            TransportDeliveryStatus::Deleted => Self::Deleted,
            TransportDeliveryStatus::Accepted => Self::Accepted,
            TransportDeliveryStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<DeliveryReportMessageStatus> for TransportDeliveryStatus {
    fn from(value: DeliveryReportMessageStatus) -> Self {
        match value {
            DeliveryReportMessageStatus::Delivered => Self::Delivered,
            DeliveryReportMessageStatus::Undelivered => Self::Undelivered,
            DeliveryReportMessageStatus::Expired => Self::Expired,
            DeliveryReportMessageStatus::Deleted => Self::Deleted,
            DeliveryReportMessageStatus::Accepted => Self::Accepted,
            DeliveryReportMessageStatus::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum TransportDeliveredAs {
    Sms,
    Push,
    #[serde(rename = "failover-sms")]
    FailoverSms,
    Voice,
}

impl From<TransportDeliveredAs> for DeliveredAs {
    fn from(value: TransportDeliveredAs) -> Self {
        match value {
            TransportDeliveredAs::Sms => Self::Sms,
            TransportDeliveredAs::Push => Self::Push,
            TransportDeliveredAs::FailoverSms => Self::FailoverSms,
            TransportDeliveredAs::Voice => Self::Voice,
        }
    }
}

impl From<DeliveredAs> for TransportDeliveredAs {
    fn from(value: DeliveredAs) -> Self {
        match value {
            DeliveredAs::Sms => Self::Sms,
            DeliveredAs::Push => Self::Push,
            DeliveredAs::FailoverSms => Self::FailoverSms,
            DeliveredAs::Voice => Self::Voice,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextJson {
    notification_id: String,
    sender_address: String,
    sender_address_type: TransportAddressType,
    recipient_address: String,
    recipient_address_type: TransportAddressType,
    #[serde(default)]
    message_flash_sms: bool,
    text_message_content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinaryJson {
    notification_id: String,
    sender_address: String,
    sender_address_type: TransportAddressType,
    recipient_address: String,
    recipient_address_type: TransportAddressType,
    #[serde(default)]
    message_flash_sms: bool,
    user_data_header_present: bool,
    binary_message_content: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryReportJson {
    notification_id: String,
    sender_address: String,
    transfer_id: String,
    delivery_report_message_status: TransportDeliveryStatus,
    sent_on: DateTime<FixedOffset>,
    delivered_on: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delivered_as: Option<TransportDeliveredAs>,
    client_message_id: String,
}

/// Serialization view: the tag is written from the variant itself.
#[derive(Debug, Serialize)]
#[serde(tag = "messageType", rename_all = "camelCase")]
enum NotificationJson {
    Text(TextJson),
    Binary(BinaryJson),
    DeliveryReport(DeliveryReportJson),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookResponseJson<'a> {
    status_code: i32,
    status_message: &'a str,
}

impl From<TextJson> for TextNotification {
    fn from(value: TextJson) -> Self {
        Self {
            notification_id: value.notification_id,
            sender_address: value.sender_address,
            sender_address_type: value.sender_address_type.into(),
            recipient_address: value.recipient_address,
            recipient_address_type: value.recipient_address_type.into(),
            message_flash_sms: value.message_flash_sms,
            text_message_content: value.text_message_content,
        }
    }
}

impl From<&TextNotification> for TextJson {
    fn from(value: &TextNotification) -> Self {
        Self {
            notification_id: value.notification_id.clone(),
            sender_address: value.sender_address.clone(),
            sender_address_type: value.sender_address_type.into(),
            recipient_address: value.recipient_address.clone(),
            recipient_address_type: value.recipient_address_type.into(),
            message_flash_sms: value.message_flash_sms,
            text_message_content: value.text_message_content.clone(),
        }
    }
}

impl From<BinaryJson> for BinaryNotification {
    fn from(value: BinaryJson) -> Self {
        Self {
            notification_id: value.notification_id,
            sender_address: value.sender_address,
            sender_address_type: value.sender_address_type.into(),
            recipient_address: value.recipient_address,
            recipient_address_type: value.recipient_address_type.into(),
            message_flash_sms: value.message_flash_sms,
            user_data_header_present: value.user_data_header_present,
            binary_message_content: value.binary_message_content,
        }
    }
}

impl From<&BinaryNotification> for BinaryJson {
    fn from(value: &BinaryNotification) -> Self {
        Self {
            notification_id: value.notification_id.clone(),
            sender_address: value.sender_address.clone(),
            sender_address_type: value.sender_address_type.into(),
            recipient_address: value.recipient_address.clone(),
            recipient_address_type: value.recipient_address_type.into(),
            message_flash_sms: value.message_flash_sms,
            user_data_header_present: value.user_data_header_present,
            binary_message_content: value.binary_message_content.clone(),
        }
    }
}

impl From<DeliveryReportJson> for DeliveryReportNotification {
    fn from(value: DeliveryReportJson) -> Self {
        Self {
            notification_id: value.notification_id,
            sender_address: value.sender_address,
            transfer_id: value.transfer_id,
            delivery_report_message_status: value.delivery_report_message_status.into(),
            sent_on: value.sent_on,
            delivered_on: value.delivered_on,
            delivered_as: value.delivered_as.map(Into::into),
            client_message_id: value.client_message_id,
        }
    }
}

impl From<&DeliveryReportNotification> for DeliveryReportJson {
    fn from(value: &DeliveryReportNotification) -> Self {
        Self {
            notification_id: value.notification_id.clone(),
            sender_address: value.sender_address.clone(),
            transfer_id: value.transfer_id.clone(),
            delivery_report_message_status: value.delivery_report_message_status.into(),
            sent_on: value.sent_on,
            delivered_on: value.delivered_on,
            delivered_as: value.delivered_as.map(Into::into),
            client_message_id: value.client_message_id.clone(),
        }
    }
}

fn message_type_from_tag(tag: &str) -> Option<WebhookMessageType> {
    Some(match tag {
        "text" => WebhookMessageType::Text,
        "binary" => WebhookMessageType::Binary,
        "deliveryReport" => WebhookMessageType::DeliveryReport,
        _ => return None,
    })
}

/// Select the variant from `messageType`, then decode the whole object as that variant.
pub fn decode_webhook_value(value: Value) -> Result<WebhookNotification, WebhookError> {
    let Some(object) = value.as_object() else {
        return Err(WebhookError::MalformedPayload(serde_json::Error::custom(
            "webhook payload must be a JSON object",
        )));
    };
    let tag = object
        .get(DISCRIMINATOR)
        .ok_or(WebhookError::MissingDiscriminator)?;
    let message_type = match tag {
        Value::String(tag) => message_type_from_tag(tag),
        _ => None,
    }
    .ok_or_else(|| WebhookError::UnknownVariant(tag_text(tag)))?;

    let notification = match message_type {
        WebhookMessageType::Text => {
            WebhookNotification::Text(serde_json::from_value::<TextJson>(value)?.into())
        }
        WebhookMessageType::Binary => {
            WebhookNotification::Binary(serde_json::from_value::<BinaryJson>(value)?.into())
        }
        WebhookMessageType::DeliveryReport => WebhookNotification::DeliveryReport(
            serde_json::from_value::<DeliveryReportJson>(value)?.into(),
        ),
    };
    Ok(notification)
}

fn tag_text(tag: &Value) -> String {
    match tag {
        Value::String(tag) => tag.clone(),
        other => other.to_string(),
    }
}

pub fn encode_webhook_json(notification: &WebhookNotification) -> Result<String, WebhookError> {
    let body = match notification {
        WebhookNotification::Text(text) => NotificationJson::Text(text.into()),
        WebhookNotification::Binary(binary) => NotificationJson::Binary(binary.into()),
        WebhookNotification::DeliveryReport(report) => {
            NotificationJson::DeliveryReport(report.into())
        }
    };
    serde_json::to_string(&body).map_err(WebhookError::Serialize)
}

pub fn encode_webhook_response_json(response: &WebhookResponse) -> Result<String, WebhookError> {
    let body = WebhookResponseJson {
        status_code: response.status_code.as_i32(),
        status_message: &response.status_message,
    };
    serde_json::to_string(&body).map_err(WebhookError::Serialize)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn delivery_report() -> Value {
        json!({
            "messageType": "deliveryReport",
            "notificationId": "050f9005180a2a212469",
            "senderAddress": "4367612345678",
            "transferId": "0051949fe700053c4615",
            "deliveryReportMessageStatus": "delivered",
            "sentOn": "2013-05-27T13:36:00.000+02:00",
            "deliveredOn": "2013-05-27T13:36:05.000+02:00",
            "deliveredAs": "failover-sms",
            "clientMessageId": "cm-1"
        })
    }

    #[test]
    fn decode_rejects_non_object_payload() {
        let err = decode_webhook_value(json!(["text"])).unwrap_err();
        assert!(matches!(err, WebhookError::MalformedPayload(_)));
    }

    #[test]
    fn decode_reports_non_string_tag_as_unknown_variant() {
        let err = decode_webhook_value(json!({ "messageType": 7 })).unwrap_err();
        assert!(matches!(err, WebhookError::UnknownVariant(tag) if tag == "7"));

        let err = decode_webhook_value(json!({ "messageType": null })).unwrap_err();
        assert!(matches!(err, WebhookError::UnknownVariant(tag) if tag == "null"));
    }

    #[test]
    fn decode_delivery_report_maps_failover_channel() {
        let notification = decode_webhook_value(delivery_report()).unwrap();
        let WebhookNotification::DeliveryReport(report) = notification else {
            panic!("expected delivery report");
        };
        assert_eq!(report.delivered_as, Some(DeliveredAs::FailoverSms));
        assert_eq!(
            report.delivery_report_message_status,
            DeliveryReportMessageStatus::Delivered
        );
        assert_eq!(report.sent_on.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn decode_rejects_unknown_enum_value() {
        let mut payload = delivery_report();
        payload["deliveredAs"] = json!("carrier-pigeon");
        let err = decode_webhook_value(payload).unwrap_err();
        assert!(matches!(err, WebhookError::MalformedPayload(_)));
    }

    #[test]
    fn decode_rejects_malformed_timestamp() {
        let mut payload = delivery_report();
        payload["sentOn"] = json!("yesterday");
        let err = decode_webhook_value(payload).unwrap_err();
        assert!(matches!(err, WebhookError::MalformedPayload(_)));
    }

    #[test]
    fn encode_writes_tag_and_skips_absent_channel() {
        let mut payload = delivery_report();
        payload.as_object_mut().unwrap().remove("deliveredAs");
        let notification = decode_webhook_value(payload).unwrap();

        let encoded: Value =
            serde_json::from_str(&encode_webhook_json(&notification).unwrap()).unwrap();
        assert_eq!(encoded["messageType"], json!("deliveryReport"));
        assert_eq!(encoded["transferId"], json!("0051949fe700053c4615"));
        assert!(encoded.get("deliveredAs").is_none());
        assert!(!encoded.to_string().contains("null"));
    }

    #[test]
    fn encode_response_uses_numeric_status_code() {
        let encoded = encode_webhook_response_json(&WebhookResponse::ok()).unwrap();
        assert_eq!(encoded, r#"{"statusCode":2000,"statusMessage":"ok"}"#);
    }
}
