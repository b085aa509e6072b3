/// Template registrations for locale-specific content (AMP bodies)
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRegistration {
    /// Locale tag such as `en-US`; `None` marks the default registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    pub content: String,
}

impl TemplateRegistration {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            locale: None,
            content: content.into(),
        }
    }

    pub fn for_locale(locale: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
            content: content.into(),
        }
    }
}

/// Set of AMP template registrations, one per locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmpTemplate {
    #[serde(default)]
    pub registrations: Vec<TemplateRegistration>,
}

impl AmpTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, registration: TemplateRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Resolves the registration for a locale.
    ///
    /// Strict lookup only accepts an exact locale match. Non-strict lookup
    /// falls back to the language part of the locale, then to the default
    /// registration.
    pub fn registration(&self, locale: Option<&str>, strict: bool) -> Option<&TemplateRegistration> {
        let locale = locale.map(str::trim).filter(|l| !l.is_empty());

        let Some(locale) = locale else {
            return self.default_registration();
        };

        if let Some(exact) = self.find_locale(locale) {
            return Some(exact);
        }

        if strict {
            return None;
        }

        let language = locale.split(['-', '_']).next().unwrap_or(locale);
        self.find_locale(language)
            .or_else(|| self.default_registration())
    }

    fn find_locale(&self, locale: &str) -> Option<&TemplateRegistration> {
        self.registrations.iter().find(|r| {
            r.locale
                .as_deref()
                .is_some_and(|l| l.trim().eq_ignore_ascii_case(locale))
        })
    }

    fn default_registration(&self) -> Option<&TemplateRegistration> {
        self.registrations.iter().find(|r| r.locale.is_none())
    }
}
