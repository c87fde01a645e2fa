use crate::routing::LocalePrefix;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Locale routing
    pub locale_prefix: LocalePrefix,
    pub locale_detection: bool,

    // Content
    pub content_path: String,

    // Telegram (contact form); optional so the site still serves pages without it
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_api_base: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            port: match std::env::var("PORT") {
                Ok(v) => v.parse().context(format!("PORT is not a valid port: '{}'", v))?,
                Err(_) => 8080,
            },

            // Locale routing
            locale_prefix: match std::env::var("LOCALE_PREFIX") {
                Ok(v) => v.parse().context("LOCALE_PREFIX is invalid")?,
                Err(_) => LocalePrefix::default(),
            },
            locale_detection: match std::env::var("LOCALE_DETECTION") {
                Ok(v) => parse_bool(&v)
                    .context(format!("LOCALE_DETECTION is not a boolean: '{}'", v))?,
                Err(_) => true,
            },

            // Content
            content_path: std::env::var("CONTENT_PATH")
                .unwrap_or_else(|_| "content/site.json".to_string()),

            // Telegram
            telegram_bot_token: non_empty_var("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: non_empty_var("TELEGRAM_CHAT_ID"),
            telegram_api_base: std::env::var("TELEGRAM_API_BASE")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 7] = [
        "PORT",
        "LOCALE_PREFIX",
        "LOCALE_DETECTION",
        "CONTENT_PATH",
        "TELEGRAM_BOT_TOKEN",
        "TELEGRAM_CHAT_ID",
        "TELEGRAM_API_BASE",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().expect("defaults load");

        assert_eq!(config.port, 8080);
        assert_eq!(config.locale_prefix, LocalePrefix::Always);
        assert!(config.locale_detection);
        assert_eq!(config.content_path, "content/site.json");
        assert!(config.telegram_bot_token.is_none());
        assert!(config.telegram_chat_id.is_none());
        assert_eq!(config.telegram_api_base, "https://api.telegram.org");
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        std::env::set_var("PORT", "3000");
        std::env::set_var("LOCALE_PREFIX", "as-needed");
        std::env::set_var("LOCALE_DETECTION", "off");
        std::env::set_var("TELEGRAM_BOT_TOKEN", "token");
        std::env::set_var("TELEGRAM_CHAT_ID", "42");

        let config = Config::from_env().expect("overrides load");
        clear_env();

        assert_eq!(config.port, 3000);
        assert_eq!(config.locale_prefix, LocalePrefix::AsNeeded);
        assert!(!config.locale_detection);
        assert_eq!(config.telegram_bot_token.as_deref(), Some("token"));
        assert_eq!(config.telegram_chat_id.as_deref(), Some("42"));
    }

    #[test]
    #[serial]
    fn test_blank_telegram_values_treated_as_missing() {
        clear_env();
        std::env::set_var("TELEGRAM_BOT_TOKEN", "   ");
        let config = Config::from_env().expect("loads");
        clear_env();

        assert!(config.telegram_bot_token.is_none());
    }

    #[test]
    #[serial]
    fn test_invalid_values_rejected() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");
        assert!(Config::from_env().is_err());

        clear_env();
        std::env::set_var("LOCALE_PREFIX", "sometimes");
        let err = Config::from_env().unwrap_err();
        assert!(format!("{:#}", err).contains("sometimes"));

        clear_env();
        std::env::set_var("LOCALE_DETECTION", "maybe");
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
