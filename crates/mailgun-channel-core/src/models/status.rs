/// Cross-provider communication status taxonomy
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCategory {
    Info,
    Success,
    ClientError,
    ServerError,
}

impl StatusCategory {
    /// First code of the category's range; sub-codes 0-999 are added to it
    pub fn base_code(&self) -> u32 {
        match self {
            Self::Info => 1000,
            Self::Success => 2000,
            Self::ClientError => 4000,
            Self::ServerError => 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationsStatus {
    pub category: StatusCategory,
    pub sub_code: u16,
    pub provider_id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CommunicationsStatus {
    pub fn new(
        category: StatusCategory,
        provider_id: impl Into<String>,
        label: impl Into<String>,
        sub_code: u16,
        detail: Option<String>,
    ) -> Self {
        Self {
            category,
            sub_code,
            provider_id: provider_id.into(),
            label: label.into(),
            detail,
        }
    }

    pub fn info(
        provider_id: impl Into<String>,
        label: impl Into<String>,
        sub_code: u16,
        detail: Option<String>,
    ) -> Self {
        Self::new(StatusCategory::Info, provider_id, label, sub_code, detail)
    }

    pub fn success(
        provider_id: impl Into<String>,
        label: impl Into<String>,
        sub_code: u16,
        detail: Option<String>,
    ) -> Self {
        Self::new(StatusCategory::Success, provider_id, label, sub_code, detail)
    }

    pub fn client_error(
        provider_id: impl Into<String>,
        label: impl Into<String>,
        sub_code: u16,
        detail: Option<String>,
    ) -> Self {
        Self::new(StatusCategory::ClientError, provider_id, label, sub_code, detail)
    }

    pub fn server_error(
        provider_id: impl Into<String>,
        label: impl Into<String>,
        sub_code: u16,
        detail: Option<String>,
    ) -> Self {
        Self::new(StatusCategory::ServerError, provider_id, label, sub_code, detail)
    }

    /// Host status code: category base plus sub-code
    pub fn code(&self) -> u32 {
        self.category.base_code() + u32::from(self.sub_code)
    }

    pub fn is_success(&self) -> bool {
        self.category == StatusCategory::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_adds_sub_code_to_category_base() {
        let status = CommunicationsStatus::server_error("Mailgun", "failed", 550, None);
        assert_eq!(status.code(), 5550);
        assert!(!status.is_success());

        let status = CommunicationsStatus::success("Mailgun", "delivered", 0, None);
        assert_eq!(status.code(), 2000);
        assert!(status.is_success());
    }

    #[test]
    fn test_status_serialization() {
        let status = CommunicationsStatus::info("Mailgun", "accepted", 0, None);
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["category"], "Info");
        assert!(json.get("detail").is_none());
    }
}
