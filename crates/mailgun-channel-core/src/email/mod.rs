/// Outbound email translation into Mailgun's message payload
pub mod builder;
pub mod payload;

pub use builder::build_message_payload;
pub use payload::{FormPart, FormPayload};
