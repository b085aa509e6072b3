/// Outbound payload validation
use crate::constants::MAX_RECIPIENTS;
use crate::error::MailgunError;

pub fn validate_recipient_count(count: usize) -> Result<(), MailgunError> {
    if count == 0 {
        return Err(MailgunError::Validation(
            "At least one recipient is required.".to_string(),
        ));
    }

    if count > MAX_RECIPIENTS {
        return Err(MailgunError::Validation(format!(
            "Recipient count exceeds max of {}.",
            MAX_RECIPIENTS
        )));
    }

    Ok(())
}

/// Returns the value when it is non-blank, a validation error otherwise
pub fn require_field<'a>(key: &str, value: Option<&'a str>) -> Result<&'a str, MailgunError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(MailgunError::Validation(format!(
            "Cannot add {} value is null.",
            key
        ))),
    }
}

/// Checks that an attachment content type is a well-formed MIME type
pub fn validate_content_type(content_type: &str) -> Result<(), MailgunError> {
    content_type
        .parse::<mime::Mime>()
        .map(|_| ())
        .map_err(|e| {
            MailgunError::Validation(format!(
                "Invalid attachment content type '{}': {}",
                content_type, e
            ))
        })
}

pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_recipient_count() {
        assert!(validate_recipient_count(1).is_ok());
        assert!(validate_recipient_count(1000).is_ok());
        assert!(validate_recipient_count(0).is_err());
        assert!(validate_recipient_count(1001).is_err());
    }

    #[test]
    fn test_require_field() {
        assert_eq!(require_field("from", Some("a@example.com")).unwrap(), "a@example.com");
        assert!(require_field("from", Some("  ")).is_err());
        assert!(require_field("from", None).is_err());
    }

    #[test]
    fn test_validate_content_type() {
        assert!(validate_content_type("application/pdf").is_ok());
        assert!(validate_content_type("text/plain; charset=utf-8").is_ok());
        assert!(validate_content_type("not a mime").is_err());
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some(" ")));
        assert!(!is_blank(Some("x")));
    }
}
