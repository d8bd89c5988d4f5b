//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
pub mod segment;
mod validation;
mod value;
mod webhook;

pub use request::{
    BinaryRequestError, ContentCategory, MessageType, SEND_MAX_RECIPIENTS, SendBinarySms,
    SendOptions, SendTextSms, SenderAddressType,
};
pub use response::{MessageSendResponse, WebhookResponse};
pub use segment::{
    ConcatenatedHeader, SegmentError, decode_segments, encode_segments,
    encode_segments_with_reference,
};
pub use validation::ValidationError;
pub use value::{
    AccessToken, ClientMessageId, KnownStatusCode, MessageContent, NotificationCallbackUrl,
    Password, PhoneNumber, RecipientAddress, SenderAddress, StatusCode, Username,
    ValidityPeriod,
};
pub use webhook::{
    AddressType, BinaryNotification, DeliveredAs, DeliveryReportMessageStatus,
    DeliveryReportNotification, TextNotification, WebhookMessageType, WebhookNotification,
};
