//! Contact form: forwards submissions to a Telegram chat.

use crate::config::Config;
use crate::server::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Contact form submission
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: String,
    parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("invalid submission: {0}")]
    Invalid(String),

    #[error("Telegram is not configured")]
    NotConfigured,

    #[error("Telegram rejected the message: {0}")]
    Rejected(String),

    #[error("failed to reach Telegram: {0}")]
    Transport(#[from] reqwest::Error),
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ContactError::Invalid(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ContactError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Missing server configuration".to_string(),
            ),
            ContactError::Rejected(description) => (StatusCode::UNAUTHORIZED, description.clone()),
            ContactError::Transport(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl ContactRequest {
    fn validate(&self) -> Result<(), ContactError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactError::Invalid(format!("'{}' is required", field)));
            }
        }
        if !self.email.contains('@') {
            return Err(ContactError::Invalid("'email' is not an email address".to_string()));
        }
        Ok(())
    }
}

/// `POST /web-api/contact`
pub async fn handle_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ContactError> {
    let Json(submission) = payload.map_err(|rejection| {
        warn!("Rejected contact submission: {}", rejection.body_text());
        ContactError::Invalid("request body must be a JSON object".to_string())
    })?;

    submission.validate()?;

    match send_contact_message(&state.http, &state.config, &submission).await {
        Ok(()) => {
            info!("✓ Contact message forwarded");
            Ok(Json(json!({ "success": true })))
        }
        Err(e) => {
            error!("Contact forwarding failed: {}", e);
            Err(e)
        }
    }
}

/// Send a contact submission to the configured Telegram chat.
pub async fn send_contact_message(
    client: &reqwest::Client,
    config: &Config,
    submission: &ContactRequest,
) -> Result<(), ContactError> {
    let (Some(token), Some(chat_id)) = (
        config.telegram_bot_token.as_deref(),
        config.telegram_chat_id.as_deref(),
    ) else {
        return Err(ContactError::NotConfigured);
    };

    let url = format!(
        "{}/bot{}/sendMessage",
        config.telegram_api_base.trim_end_matches('/'),
        token
    );

    let request = SendMessageRequest {
        chat_id,
        text: format_contact_message(submission),
        parse_mode: "HTML",
    };

    // Telegram reports failures as {"ok": false, "description": ...} with a
    // non-2xx status, so the body is read regardless of status.
    let response: TelegramResponse = client
        .post(&url)
        .json(&request)
        .send()
        .await?
        .json()
        .await?;

    if !response.ok {
        return Err(ContactError::Rejected(
            response
                .description
                .unwrap_or_else(|| "unknown Telegram error".to_string()),
        ));
    }

    Ok(())
}

/// Build the HTML message for a submission. User input is escaped.
pub fn format_contact_message(submission: &ContactRequest) -> String {
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M UTC");
    format!(
        "<b>📩 New contact request</b>\n\
<b>👤 Name:</b> {}\n\
<b>📧 Email:</b> {}\n\
<b>💬 Message:</b> {}\n\
<i>{}</i>",
        escape_html(submission.name.trim()),
        escape_html(submission.email.trim()),
        escape_html(submission.message.trim()),
        timestamp
    )
}

/// Escape the characters Telegram's HTML parse mode treats as markup.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b && c > \"d\""), "a &lt; b &amp;&amp; c &gt; &quot;d&quot;");
        assert_eq!(escape_html("Xin chào"), "Xin chào");
    }

    #[test]
    fn test_format_contact_message() {
        let text = format_contact_message(&submission("An <b>", "an@example.com", "Hello & bye"));
        assert!(text.starts_with("<b>📩 New contact request</b>"));
        assert!(text.contains("<b>👤 Name:</b> An &lt;b&gt;"));
        assert!(text.contains("<b>📧 Email:</b> an@example.com"));
        assert!(text.contains("<b>💬 Message:</b> Hello &amp; bye"));
        assert!(text.contains("UTC</i>"));
    }

    #[test]
    fn test_validate_requires_all_fields() {
        assert!(submission("An", "an@example.com", "Hi").validate().is_ok());

        let err = submission(" ", "an@example.com", "Hi").validate().unwrap_err();
        assert!(err.to_string().contains("'name'"));

        let err = submission("An", "an@example.com", "").validate().unwrap_err();
        assert!(err.to_string().contains("'message'"));

        let err = submission("An", "not-an-email", "Hi").validate().unwrap_err();
        assert!(matches!(err, ContactError::Invalid(_)));
    }

    #[test]
    fn test_request_deserialization_defaults_missing_fields() {
        let request: ContactRequest = serde_json::from_str(r#"{"name": "An"}"#).unwrap();
        assert_eq!(request.name, "An");
        assert!(request.email.is_empty());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_telegram_response_deserialization() {
        let ok: TelegramResponse = serde_json::from_str(r#"{"ok": true, "result": {}}"#).unwrap();
        assert!(ok.ok);

        let failed: TelegramResponse =
            serde_json::from_str(r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#)
                .unwrap();
        assert!(!failed.ok);
        assert_eq!(failed.description.as_deref(), Some("Unauthorized"));
    }

    #[tokio::test]
    async fn test_send_without_configuration() {
        let config = Config {
            port: 8080,
            locale_prefix: Default::default(),
            locale_detection: true,
            content_path: String::new(),
            telegram_bot_token: None,
            telegram_chat_id: Some("1".to_string()),
            telegram_api_base: "http://127.0.0.1:9".to_string(),
        };

        let err = send_contact_message(
            &reqwest::Client::new(),
            &config,
            &submission("An", "an@example.com", "Hi"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ContactError::NotConfigured));
    }
}
