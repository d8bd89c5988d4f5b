use std::io;

use websms::{RecipientAddress, SendBinarySms, SendOptions, WebSmsApiOptions, WebSmsClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let recipient = std::env::var("WEBSMS_RECIPIENT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "WEBSMS_RECIPIENT environment variable is required",
        )
    })?;

    let client = WebSmsClient::from_options(&WebSmsApiOptions::from_env()?)?;
    let request = SendBinarySms::from_texts(
        vec![RecipientAddress::new(recipient)?],
        &["hi there! ", "this is a ", "concatenated test message."],
        SendOptions {
            test: true,
            ..Default::default()
        },
    )?;

    let response = client.send_binary_message(&request).await?;
    println!(
        "status_code: {:?}, sms_count: {}, transfer_id: {:?}",
        response.status_code, response.sms_count, response.transfer_id
    );

    Ok(())
}
