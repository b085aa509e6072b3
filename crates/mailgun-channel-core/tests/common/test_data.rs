/// Test data builders and helpers
use bytes::Bytes;
use mailgun_channel_core::models::{
    EmailAddress, EmailAttachment, EmailProperties, OutboundEmail,
};

pub fn address(index: usize) -> EmailAddress {
    EmailAddress::new(format!("user{}@example.com", index))
}

/// Email with `count` To recipients and a text body
pub fn email_with_recipients(count: usize) -> OutboundEmail {
    OutboundEmail::builder()
        .from(EmailAddress::new("sender@mg.example.com").with_name("Sender"))
        .to((0..count).map(address).collect())
        .subject("Order confirmation")
        .text_body("Thanks for your order.")
        .build()
}

pub fn simple_email() -> OutboundEmail {
    email_with_recipients(1)
}

pub fn with_properties(mut email: OutboundEmail, properties: EmailProperties) -> OutboundEmail {
    properties
        .apply_to(&mut email.extended_properties)
        .expect("email properties serialize");
    email
}

pub fn pdf_attachment(name: &str) -> EmailAttachment {
    EmailAttachment::new(name, "application/pdf", Bytes::from_static(b"%PDF-1.4"))
}

/// Attachment that has no content; skipped on the wire
pub fn empty_attachment(name: &str) -> EmailAttachment {
    EmailAttachment {
        name: Some(name.to_string()),
        content_type: None,
        content: None,
    }
}
