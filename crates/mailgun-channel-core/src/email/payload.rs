/// Multipart form payload for the Mailgun messages endpoint
use crate::error::MailgunError;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: Option<String>,
        content: Bytes,
    },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Ordered list of form parts; a field name may repeat
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    parts: Vec<FormPart>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn add_file(
        &mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: Option<String>,
        content: Bytes,
    ) {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type,
            content,
        });
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// First text value of a field
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values(name).into_iter().next()
    }

    /// Every text value of a repeated field, in insertion order
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn files(&self) -> impl Iterator<Item = &FormPart> {
        self.parts
            .iter()
            .filter(|part| matches!(part, FormPart::File { .. }))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|part| part.name() == name)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Converts into a reqwest multipart form
    pub fn into_multipart(self) -> Result<Form, MailgunError> {
        let mut form = Form::new();
        for part in self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    file_name,
                    content_type,
                    content,
                } => {
                    let mut file = Part::bytes(content.to_vec()).file_name(file_name);
                    if let Some(content_type) = content_type {
                        file = file.mime_str(&content_type).map_err(|e| {
                            MailgunError::Validation(format!(
                                "Invalid attachment content type '{}': {}",
                                content_type, e
                            ))
                        })?;
                    }
                    form.part(name, file)
                }
            };
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_fields_keep_order() {
        let mut payload = FormPayload::new();
        payload.add_text("to", "a@example.com");
        payload.add_text("subject", "Hi");
        payload.add_text("to", "b@example.com");

        assert_eq!(payload.values("to"), vec!["a@example.com", "b@example.com"]);
        assert_eq!(payload.value("subject"), Some("Hi"));
        assert!(!payload.contains("cc"));
        assert_eq!(payload.len(), 3);
    }

    #[test]
    fn test_files_are_not_text_values() {
        let mut payload = FormPayload::new();
        payload.add_file(
            "attachment",
            "report.pdf",
            Some("application/pdf".to_string()),
            Bytes::from_static(b"%PDF"),
        );

        assert!(payload.contains("attachment"));
        assert!(payload.value("attachment").is_none());
        assert_eq!(payload.files().count(), 1);
    }

    #[test]
    fn test_into_multipart() {
        let mut payload = FormPayload::new();
        payload.add_text("from", "from@example.com");
        payload.add_file("attachment", "a.txt", None, Bytes::from_static(b"hello"));

        assert!(payload.into_multipart().is_ok());
    }
}
