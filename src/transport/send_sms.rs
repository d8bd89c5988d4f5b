use serde::{Deserialize, Serialize};

use crate::domain::{
    ContentCategory, MessageSendResponse, MessageType, RecipientAddress, SendBinarySms,
    SendOptions, SendTextSms, SenderAddressType, StatusCode,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
enum TransportContentCategory {
    Informational,
    Advertisement,
}

impl From<ContentCategory> for TransportContentCategory {
    fn from(value: ContentCategory) -> Self {
        match value {
            ContentCategory::Informational => Self::Informational,
            ContentCategory::Advertisement => Self::Advertisement,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
enum TransportSenderAddressType {
    National,
    International,
    Alphanumeric,
    Shortcode,
}

impl From<SenderAddressType> for TransportSenderAddressType {
    fn from(value: SenderAddressType) -> Self {
        match value {
            SenderAddressType::National => Self::National,
            SenderAddressType::International => Self::International,
            SenderAddressType::Alphanumeric => Self::Alphanumeric,
            SenderAddressType::Shortcode => Self::Shortcode,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
enum TransportMessageType {
    Default,
    Voice,
}

impl From<MessageType> for TransportMessageType {
    fn from(value: MessageType) -> Self {
        match value {
            MessageType::Default => Self::Default,
            MessageType::Voice => Self::Voice,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendOptionsJson<'a> {
    recipient_address_list: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_message_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_category: Option<TransportContentCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notification_callback_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<i32>,
    send_as_flash_sms: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender_address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender_address_type: Option<TransportSenderAddressType>,
    test: bool,
    #[serde(rename = "validityPeriode", skip_serializing_if = "Option::is_none")]
    validity_period: Option<u32>,
}

impl<'a> SendOptionsJson<'a> {
    fn new(recipients: &'a [RecipientAddress], options: &'a SendOptions) -> Self {
        Self {
            recipient_address_list: recipients.iter().map(RecipientAddress::raw).collect(),
            client_message_id: options.client_message_id.as_ref().map(|id| id.as_str()),
            content_category: options.content_category.map(Into::into),
            notification_callback_url: options
                .notification_callback_url
                .as_ref()
                .map(|url| url.as_str()),
            priority: options.priority,
            send_as_flash_sms: options.send_as_flash_sms,
            sender_address: options.sender_address.as_ref().map(|sender| sender.as_str()),
            sender_address_type: options.sender_address_type.map(Into::into),
            test: options.test,
            validity_period: options.validity_period.map(|period| period.seconds()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextSmsJsonRequest<'a> {
    message_content: &'a str,
    max_sms_per_message: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_type: Option<TransportMessageType>,
    #[serde(flatten)]
    options: SendOptionsJson<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BinarySmsJsonRequest<'a> {
    message_content: &'a [String],
    user_data_header_present: bool,
    #[serde(flatten)]
    options: SendOptionsJson<'a>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageSendJsonResponse {
    status_code: i32,
    #[serde(default)]
    status_message: String,
    #[serde(default)]
    client_message_id: Option<String>,
    #[serde(default)]
    sms_count: u32,
    #[serde(default)]
    transfer_id: Option<String>,
}

pub fn encode_text_sms_json(request: &SendTextSms) -> Result<String, TransportError> {
    let body = TextSmsJsonRequest {
        message_content: request.content().as_str(),
        max_sms_per_message: request.max_sms_per_message(),
        message_type: request.message_type().map(Into::into),
        options: SendOptionsJson::new(request.recipients(), request.options()),
    };
    Ok(serde_json::to_string(&body)?)
}

pub fn encode_binary_sms_json(request: &SendBinarySms) -> Result<String, TransportError> {
    let body = BinarySmsJsonRequest {
        message_content: request.segments(),
        user_data_header_present: request.user_data_header_present(),
        options: SendOptionsJson::new(request.recipients(), request.options()),
    };
    Ok(serde_json::to_string(&body)?)
}

pub fn decode_message_send_json_response(
    json: &str,
) -> Result<MessageSendResponse, TransportError> {
    let parsed: MessageSendJsonResponse = serde_json::from_str(json)?;
    Ok(MessageSendResponse {
        client_message_id: parsed.client_message_id,
        sms_count: parsed.sms_count,
        status_code: StatusCode::new(parsed.status_code),
        status_message: parsed.status_message,
        transfer_id: parsed.transfer_id,
    })
}
