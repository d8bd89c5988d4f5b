//! Typed Rust client for the websms (LINK Mobility) SMS messaging API.
//!
//! The crate has a domain layer of strong types (including the concatenated
//! binary SMS codec and the inbound notification sum type), a private
//! transport layer for wire-format quirks, a client layer orchestrating HTTP
//! requests, and [`webhook`] helpers for inbound notifications.
//!
//! ```rust,no_run
//! use websms::{Auth, MessageContent, RecipientAddress, SendOptions, SendTextSms, WebSmsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), websms::WebSmsError> {
//!     let client = WebSmsClient::new(Auth::bearer("...")?);
//!     let recipient = RecipientAddress::new("436761234567")?;
//!     let content = MessageContent::new("hello")?;
//!     let request = SendTextSms::new(vec![recipient], content, SendOptions::default())?;
//!     let _resp = client.send_text_message(&request).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;
pub mod webhook;

pub use client::{
    Auth, AuthenticationType, HttpResponse, WebSmsApiOptions, WebSmsClient, WebSmsClientBuilder,
    WebSmsError,
};
pub use domain::{
    BinaryNotification, ClientMessageId, ContentCategory, DeliveryReportNotification,
    KnownStatusCode, MessageContent, MessageSendResponse, MessageType, PhoneNumber,
    RecipientAddress, SendBinarySms, SendOptions, SendTextSms, SenderAddress, SenderAddressType,
    StatusCode, TextNotification, ValidationError, WebhookNotification, WebhookResponse,
};
pub use webhook::WebhookError;
