use crate::domain::segment::{self, SegmentError};
use crate::domain::validation::ValidationError;
use crate::domain::value::{
    ClientMessageId, MessageContent, NotificationCallbackUrl, RecipientAddress, SenderAddress,
    ValidityPeriod,
};

pub const SEND_MAX_RECIPIENTS: usize = 1000;

/// Category used by the vendor for regulatory classification (`contentCategory`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentCategory {
    Informational,
    Advertisement,
}

/// How the sender address should be interpreted (`senderAddressType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SenderAddressType {
    National,
    International,
    Alphanumeric,
    Shortcode,
}

/// Delivery channel for text messages (`messageType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageType {
    #[default]
    Default,
    Voice,
}

/// Fields shared by text and binary send requests.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub client_message_id: Option<ClientMessageId>,
    pub content_category: Option<ContentCategory>,
    pub notification_callback_url: Option<NotificationCallbackUrl>,
    pub priority: Option<i32>,
    pub send_as_flash_sms: bool,
    pub sender_address: Option<SenderAddress>,
    pub sender_address_type: Option<SenderAddressType>,
    pub test: bool,
    pub validity_period: Option<ValidityPeriod>,
}

#[derive(Debug, Clone)]
pub struct SendTextSms {
    recipients: Vec<RecipientAddress>,
    content: MessageContent,
    max_sms_per_message: u32,
    message_type: Option<MessageType>,
    options: SendOptions,
}

impl SendTextSms {
    pub fn new(
        recipients: Vec<RecipientAddress>,
        content: MessageContent,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        check_recipients(&recipients)?;
        Ok(Self {
            recipients,
            content,
            max_sms_per_message: 0,
            message_type: None,
            options,
        })
    }

    /// Upper bound on generated segments; `0` (the default) means unlimited.
    ///
    /// The vendor rejects the request with status 4026 when exceeded.
    pub fn with_max_sms_per_message(mut self, max: u32) -> Self {
        self.max_sms_per_message = max;
        self
    }

    pub fn with_message_type(mut self, message_type: MessageType) -> Self {
        self.message_type = Some(message_type);
        self
    }

    pub fn recipients(&self) -> &[RecipientAddress] {
        &self.recipients
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn max_sms_per_message(&self) -> u32 {
        self.max_sms_per_message
    }

    pub fn message_type(&self) -> Option<MessageType> {
        self.message_type
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

#[derive(Debug, Clone)]
pub struct SendBinarySms {
    recipients: Vec<RecipientAddress>,
    segments: Vec<String>,
    user_data_header_present: bool,
    options: SendOptions,
}

/// Errors raised while building a [`SendBinarySms`] from plain text parts.
#[derive(Debug, thiserror::Error)]
pub enum BinaryRequestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Segment(#[from] SegmentError),
}

impl SendBinarySms {
    /// Build a request from already encoded base64 segments.
    pub fn new(
        recipients: Vec<RecipientAddress>,
        segments: Vec<String>,
        user_data_header_present: bool,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        check_recipients(&recipients)?;
        if segments.is_empty() {
            return Err(ValidationError::Empty {
                field: MessageContent::FIELD,
            });
        }
        Ok(Self {
            recipients,
            segments,
            user_data_header_present,
            options,
        })
    }

    /// Build a concatenated binary message, one segment per text part.
    pub fn from_texts<S: AsRef<str>>(
        recipients: Vec<RecipientAddress>,
        texts: &[S],
        options: SendOptions,
    ) -> Result<Self, BinaryRequestError> {
        let segments = segment::encode_segments(texts)?;
        Ok(Self::new(recipients, segments, true, options)?)
    }

    /// Like [`SendBinarySms::from_texts`], with a caller-chosen concatenation reference.
    pub fn from_texts_with_reference<S: AsRef<str>>(
        recipients: Vec<RecipientAddress>,
        texts: &[S],
        reference: u8,
        options: SendOptions,
    ) -> Result<Self, BinaryRequestError> {
        let segments = segment::encode_segments_with_reference(texts, reference)?;
        Ok(Self::new(recipients, segments, true, options)?)
    }

    pub fn recipients(&self) -> &[RecipientAddress] {
        &self.recipients
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn user_data_header_present(&self) -> bool {
        self.user_data_header_present
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

fn check_recipients(recipients: &[RecipientAddress]) -> Result<(), ValidationError> {
    if recipients.is_empty() {
        return Err(ValidationError::Empty {
            field: RecipientAddress::FIELD,
        });
    }
    if recipients.len() > SEND_MAX_RECIPIENTS {
        return Err(ValidationError::TooManyRecipients {
            max: SEND_MAX_RECIPIENTS,
            actual: recipients.len(),
        });
    }
    Ok(())
}
