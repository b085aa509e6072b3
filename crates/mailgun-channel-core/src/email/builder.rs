/// Builds the multipart payload for `POST {domain}/messages`
use super::payload::FormPayload;
use crate::constants::field;
use crate::error::MailgunError;
use crate::models::{
    DispatchContext, EmailAddress, EmailAttachment, EmailProperties, OutboundEmail,
};
use crate::utils::validation::{
    is_blank, require_field, validate_content_type, validate_recipient_count,
};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Translates an outbound email into form fields.
///
/// Fails with `MailgunError::Validation` before any network I/O when a
/// required field is missing, the recipient count is out of range, or no
/// content source is available.
pub async fn build_message_payload(
    email: &OutboundEmail,
    context: &DispatchContext,
) -> Result<FormPayload, MailgunError> {
    let properties = EmailProperties::from_extended(&email.extended_properties);
    let has_template = properties.has_template();
    let mut form = FormPayload::new();

    let from = email.from.as_ref().map(EmailAddress::to_string);
    add_text(&mut form, field::FROM, from.as_deref(), true)?;
    add_recipients(&mut form, email)?;
    add_text(&mut form, field::SUBJECT, email.subject.as_deref(), !has_template)?;

    if !has_template && is_blank(email.text_body.as_deref()) && is_blank(email.html_body.as_deref()) {
        return Err(MailgunError::Validation(
            "Either TextBody or HtmlBody is required when no template is provided.".to_string(),
        ));
    }

    add_text(&mut form, field::TEXT, email.text_body.as_deref(), false)?;
    add_text(&mut form, field::HTML, email.html_body.as_deref(), false)?;
    add_amp_content(&mut form, email, context, &properties).await?;

    add_text(&mut form, field::TEMPLATE, properties.template.as_deref(), false)?;
    add_text(
        &mut form,
        field::TEMPLATE_VERSION,
        properties.template_version.as_deref(),
        false,
    )?;

    add_bool(&mut form, field::DKIM, properties.dkim);
    add_text(
        &mut form,
        field::SECONDARY_DKIM,
        properties.secondary_dkim.as_deref(),
        false,
    )?;
    add_text(
        &mut form,
        field::SECONDARY_DKIM_PUBLIC,
        properties.secondary_dkim_public.as_deref(),
        false,
    )?;
    add_bool(&mut form, field::TEST_MODE, properties.test_mode);
    add_bool(&mut form, field::TRACKING, properties.tracking);
    add_bool(&mut form, field::TRACKING_CLICKS, properties.tracking_clicks);
    add_bool(&mut form, field::TRACKING_OPENS, properties.tracking_opens);
    if properties.tracking_pixel_location_top == Some(true) {
        form.add_text(field::TRACKING_PIXEL_LOCATION, "top");
    }
    add_bool(&mut form, field::REQUIRE_TLS, properties.require_tls);
    add_text(&mut form, field::SENDING_IP, properties.sending_ip.as_deref(), false)?;

    add_tags(&mut form, properties.tags.as_deref());
    add_reply_to(&mut form, &email.reply_to)?;
    add_template_variables(&mut form, context.content_model.as_ref())?;
    add_properties(&mut form, properties.properties.as_ref());
    add_attachments(&mut form, &email.attachments)?;

    debug!(
        parts = form.len(),
        recipients = email.recipient_count(),
        has_template,
        "Built Mailgun message payload"
    );

    Ok(form)
}

fn add_text(
    form: &mut FormPayload,
    key: &str,
    value: Option<&str>,
    required: bool,
) -> Result<(), MailgunError> {
    if required {
        let value = require_field(key, value)?;
        form.add_text(key, value);
    } else if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        form.add_text(key, value);
    }
    Ok(())
}

fn add_bool(form: &mut FormPayload, key: &str, value: Option<bool>) {
    if let Some(value) = value {
        form.add_text(key, if value { "yes" } else { "no" });
    }
}

fn add_recipients(form: &mut FormPayload, email: &OutboundEmail) -> Result<(), MailgunError> {
    validate_recipient_count(email.recipient_count())?;

    for (key, addresses) in [
        (field::TO, &email.to),
        (field::CC, &email.cc),
        (field::BCC, &email.bcc),
    ] {
        for address in addresses {
            form.add_text(key, address.to_string());
        }
    }
    Ok(())
}

async fn add_amp_content(
    form: &mut FormPayload,
    email: &OutboundEmail,
    context: &DispatchContext,
    properties: &EmailProperties,
) -> Result<(), MailgunError> {
    let Some(registration) = properties
        .amp_html
        .as_ref()
        .and_then(|amp| amp.registration(context.locale.as_deref(), false))
    else {
        return Ok(());
    };

    if is_blank(email.html_body.as_deref()) {
        return Err(MailgunError::Validation(
            "HtmlBody is required when using AmpHtml.".to_string(),
        ));
    }

    let model = context.content_model.clone().unwrap_or(Value::Null);
    let rendered = context.template_engine.render(registration, &model).await?;
    add_text(form, field::AMP_HTML, Some(rendered.as_str()), true)
}

fn add_tags(form: &mut FormPayload, tags: Option<&[String]>) {
    for tag in tags.unwrap_or_default() {
        if !tag.trim().is_empty() {
            form.add_text(field::TAG, tag.as_str());
        }
    }
}

fn add_reply_to(form: &mut FormPayload, reply_to: &[EmailAddress]) -> Result<(), MailgunError> {
    if reply_to.is_empty() {
        return Ok(());
    }

    let joined = reply_to
        .iter()
        .map(EmailAddress::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    add_text(form, field::REPLY_TO, Some(joined.as_str()), false)
}

fn add_template_variables(
    form: &mut FormPayload,
    content_model: Option<&Value>,
) -> Result<(), MailgunError> {
    let Some(model) = content_model.filter(|m| !m.is_null()) else {
        return Ok(());
    };

    let variables = serde_json::to_string(model)?;
    add_text(form, field::TEMPLATE_VARIABLES, Some(variables.as_str()), false)
}

fn add_properties(form: &mut FormPayload, properties: Option<&BTreeMap<String, String>>) {
    for (key, value) in properties.into_iter().flatten() {
        if key.trim().is_empty() || value.trim().is_empty() {
            continue;
        }
        form.add_text(key.as_str(), value.as_str());
    }
}

fn add_attachments(
    form: &mut FormPayload,
    attachments: &[EmailAttachment],
) -> Result<(), MailgunError> {
    let streamed = attachments
        .iter()
        .filter_map(|a| a.content.as_ref().map(|content| (a, content)));

    for (position, (attachment, content)) in streamed.enumerate() {
        let file_name = match attachment.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("attachment-{}", position + 1),
        };

        let content_type = attachment
            .content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty());
        if let Some(content_type) = content_type {
            validate_content_type(content_type)?;
        }

        form.add_file(
            field::ATTACHMENT,
            file_name,
            content_type.map(str::to_string),
            content.clone(),
        );
    }
    Ok(())
}
