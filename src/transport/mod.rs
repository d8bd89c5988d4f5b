//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod send_sms;
mod webhook;

pub use send_sms::{
    decode_message_send_json_response, encode_binary_sms_json, encode_text_sms_json,
};
pub use webhook::{decode_webhook_value, encode_webhook_json, encode_webhook_response_json};
