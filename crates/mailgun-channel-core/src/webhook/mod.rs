/// Inbound delivery webhooks: parsing, classification and report adaption
pub mod adaptor;
pub mod classifier;
pub mod parser;
pub mod values;

pub use adaptor::{DeliveryReportRequestAdaptor, EmailDeliveryStatusReportAdaptor};
pub use classifier::{classify, normalize_sub_code};
pub use parser::{parse_event, parse_form, parse_json};
