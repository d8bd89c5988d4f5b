use std::io::{self, Read};

use websms::{WebhookResponse, webhook};

/// Reads a webhook body from stdin, prints a summary, and writes the acknowledgement.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut body = String::new();
    io::stdin().read_to_string(&mut body)?;

    let notification = webhook::parse(&body)?;
    notification.handle(
        |text| println!("text from {}: {}", text.sender_address, text.text_message_content),
        |binary| match binary.decode_text() {
            Ok(text) => println!("binary from {}: {text}", binary.sender_address),
            Err(err) => eprintln!("binary from {}: undecodable ({err})", binary.sender_address),
        },
        |report| {
            println!(
                "delivery report {}: {:?} at {}",
                report.transfer_id, report.delivery_report_message_status, report.delivered_on
            )
        },
    );

    println!("{}", webhook::response_json(&WebhookResponse::ok())?);
    Ok(())
}
