use std::io;

use websms::{
    MessageContent, RecipientAddress, SendOptions, SendTextSms, WebSmsApiOptions, WebSmsClient,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let recipient = std::env::var("WEBSMS_RECIPIENT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "WEBSMS_RECIPIENT environment variable is required",
        )
    })?;
    let message = std::env::var("WEBSMS_MESSAGE")
        .unwrap_or_else(|_| "hi there! this is a test message.".to_owned());

    let client = WebSmsClient::from_options(&WebSmsApiOptions::from_env()?)?;
    let request = SendTextSms::new(
        vec![RecipientAddress::new(recipient)?],
        MessageContent::new(message)?,
        SendOptions {
            test: true,
            ..Default::default()
        },
    )?;

    let response = client.send_text_message(&request).await?;
    println!(
        "status_code: {:?}, sms_count: {}, transfer_id: {:?}",
        response.status_code, response.sms_count, response.transfer_id
    );

    Ok(())
}
