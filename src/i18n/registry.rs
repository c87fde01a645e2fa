//! Locale registry: the fixed set of locales the site is served in.
//!
//! The registry is built once at startup, validated, and then shared by
//! reference with the router and the page layer. It is never mutated after
//! construction, so readers need no synchronization.

use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

/// Configuration for a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Canonical locale code as it appears in URLs (e.g., "en", "vi")
    pub code: &'static str,

    /// Native display name (e.g., "English", "Tiếng Việt")
    pub label: &'static str,

    /// Flag shown next to the label in the language picker
    pub flag: &'static str,

    /// Whether this is the default locale (exactly one must be true)
    pub is_default: bool,
}

/// Errors raised when the locale table is misconfigured.
///
/// These only occur while building the registry at startup; a running
/// registry cannot produce them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no locales configured")]
    NoLocales,

    #[error("no default locale configured")]
    NoDefault,

    #[error("multiple default locales configured: {}", .0.join(", "))]
    MultipleDefaults(Vec<String>),

    #[error("locale code '{0}' is configured more than once")]
    DuplicateCode(String),

    #[error("invalid locale code '{0}'")]
    InvalidCode(String),
}

/// Immutable, ordered table of supported locales.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
    default_index: usize,
}

impl LocaleRegistry {
    /// Build a registry from a list of locale configurations.
    ///
    /// # Arguments
    /// * `locales` - Locales in display order
    ///
    /// # Returns
    /// * `Ok(LocaleRegistry)` if the list is non-empty, every code is well-formed
    ///   and unique, and exactly one locale is marked default
    /// * `Err(ConfigurationError)` describing the first problem found
    pub fn new(locales: Vec<LocaleConfig>) -> Result<Self, ConfigurationError> {
        if locales.is_empty() {
            return Err(ConfigurationError::NoLocales);
        }

        let code_pattern =
            Regex::new(r"^[a-z]{2,3}(-[A-Z]{2})?$").expect("locale code pattern is valid");
        let mut seen = HashSet::new();
        for locale in &locales {
            if !code_pattern.is_match(locale.code) {
                return Err(ConfigurationError::InvalidCode(locale.code.to_string()));
            }
            if !seen.insert(locale.code) {
                return Err(ConfigurationError::DuplicateCode(locale.code.to_string()));
            }
        }

        let defaults: Vec<usize> = locales
            .iter()
            .enumerate()
            .filter(|(_, locale)| locale.is_default)
            .map(|(index, _)| index)
            .collect();

        let default_index = match defaults.as_slice() {
            [] => return Err(ConfigurationError::NoDefault),
            [index] => *index,
            _ => {
                return Err(ConfigurationError::MultipleDefaults(
                    defaults
                        .iter()
                        .map(|&index| locales[index].code.to_string())
                        .collect(),
                ))
            }
        };

        Ok(Self {
            locales,
            default_index,
        })
    }

    /// The locales the site ships with: English (default) and Vietnamese.
    pub fn builtin() -> Self {
        Self::new(builtin_locales()).expect("built-in locale table is valid")
    }

    /// All supported locales, in display order.
    ///
    /// Order only matters for UI such as the language picker; resolution
    /// never depends on it.
    pub fn list_locales(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// Look up a locale by its exact code.
    pub fn get(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Check whether `code` names a supported locale (case-sensitive).
    pub fn is_supported(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// The single default locale.
    pub fn default_locale(&self) -> &LocaleConfig {
        &self.locales[self.default_index]
    }
}

/// Built-in locale table.
fn builtin_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            label: "English",
            flag: "🇺🇸",
            is_default: true,
        },
        LocaleConfig {
            code: "vi",
            label: "Tiếng Việt",
            flag: "🇻🇳",
            is_default: false,
        },
    ]
}
