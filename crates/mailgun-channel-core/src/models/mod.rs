/// Data models for the Mailgun channel provider
pub mod context;
pub mod dispatch;
pub mod email;
pub mod events;
pub mod properties;
pub mod report;
pub mod status;
pub mod template;

// Re-export commonly used types
pub use context::*;
pub use dispatch::*;
pub use email::*;
pub use events::*;
pub use properties::*;
pub use report::*;
pub use status::*;
pub use template::*;
