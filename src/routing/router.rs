//! Per-request locale resolution.
//!
//! `LocaleRouter::resolve` is a pure function of the request path, an
//! optional stored preference and the static routing configuration. It
//! performs no I/O and keeps no state between calls.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use crate::routing::ExclusionRules;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Whether page URLs always carry a locale segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalePrefix {
    /// Every page URL starts with a locale segment (`/en/projects`).
    #[default]
    Always,
    /// The default locale is served unprefixed (`/projects`); other
    /// locales keep their segment (`/vi/projects`).
    AsNeeded,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid locale prefix policy '{0}' (expected 'always' or 'as-needed')")]
pub struct InvalidLocalePrefix(String);

impl FromStr for LocalePrefix {
    type Err = InvalidLocalePrefix;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "as-needed" | "as_needed" => Ok(Self::AsNeeded),
            other => Err(InvalidLocalePrefix(other.to_string())),
        }
    }
}

impl fmt::Display for LocalePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "always"),
            Self::AsNeeded => write!(f, "as-needed"),
        }
    }
}

impl LocalePrefix {
    /// Public URL of `canonical_path` in `locale` under this policy.
    pub fn href(&self, locale: &LocaleConfig, canonical_path: &str) -> String {
        match self {
            Self::AsNeeded if locale.is_default => canonical_path.to_string(),
            _ => prefixed_path(locale.code, canonical_path),
        }
    }

    /// Link that switches from `current` to `target` on the same page.
    ///
    /// Switching always names the target locale in the path, even when the
    /// policy would serve it unprefixed: an unprefixed link would be
    /// resolved through the stored preference, which still points at
    /// `current`.
    pub fn switch_href(
        &self,
        current: &LocaleConfig,
        target: &LocaleConfig,
        canonical_path: &str,
    ) -> String {
        if current.code == target.code {
            self.href(target, canonical_path)
        } else {
            prefixed_path(target.code, canonical_path)
        }
    }
}

/// Where the resolved locale came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    /// Leading path segment named a supported locale
    Path,
    /// Previously stored preference (cookie or negotiated header)
    Preference,
    /// Registry default
    Default,
}

/// What the HTTP layer should do with a localized request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// Visible URL is already in canonical form; render as is.
    Continue,
    /// Render in the resolved locale without changing the visible URL.
    Rewrite,
    /// Send the client to this URL instead.
    Redirect(String),
}

/// A request path resolved to a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedRoute<'a> {
    pub locale: &'a LocaleConfig,
    /// Request path with any explicit locale segment removed
    pub canonical_path: String,
    pub source: LocaleSource,
    pub action: RouteAction,
}

impl LocalizedRoute<'_> {
    /// Path the page handlers are mounted on: `/{locale}{canonical_path}`.
    pub fn internal_path(&self) -> String {
        prefixed_path(self.locale.code, &self.canonical_path)
    }
}

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision<'a> {
    /// Excluded path: no locale handling at all.
    PassThrough,
    Localized(LocalizedRoute<'a>),
}

/// Resolves request paths against the locale registry.
#[derive(Debug, Clone, Copy)]
pub struct LocaleRouter<'a> {
    registry: &'a LocaleRegistry,
    rules: &'a ExclusionRules,
    prefix: LocalePrefix,
}

impl<'a> LocaleRouter<'a> {
    pub fn new(registry: &'a LocaleRegistry, rules: &'a ExclusionRules, prefix: LocalePrefix) -> Self {
        Self {
            registry,
            rules,
            prefix,
        }
    }

    /// Resolve a request path.
    ///
    /// # Arguments
    /// * `path` - Request path, without query string
    /// * `preference` - Previously stored locale choice, if any. Ignored
    ///   unless it names a supported locale.
    ///
    /// # Returns
    /// `RouteDecision::PassThrough` for excluded paths, otherwise the
    /// resolved locale, the canonical sub-path and the normalization action.
    pub fn resolve(&self, path: &str, preference: Option<&str>) -> RouteDecision<'a> {
        // Exclusion wins over everything, including paths like /en/logo.png
        if self.rules.is_excluded(path) {
            return RouteDecision::PassThrough;
        }

        let (locale, canonical_path, source) = match self.split_locale(path) {
            Some((locale, rest)) => (locale, rest, LocaleSource::Path),
            None => {
                let canonical = if path.is_empty() { "/" } else { path };
                match preference.and_then(|code| self.registry.get(code)) {
                    Some(locale) => (locale, canonical.to_string(), LocaleSource::Preference),
                    None => (
                        self.registry.default_locale(),
                        canonical.to_string(),
                        LocaleSource::Default,
                    ),
                }
            }
        };

        let action = self.action_for(locale, &canonical_path, source);

        RouteDecision::Localized(LocalizedRoute {
            locale,
            canonical_path,
            source,
            action,
        })
    }

    /// Split a leading locale segment off `path`, if it names a supported locale.
    fn split_locale(&self, path: &str) -> Option<(&'a LocaleConfig, String)> {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let (segment, rest) = match trimmed.find('/') {
            Some(index) => trimmed.split_at(index),
            None => (trimmed, ""),
        };

        let locale = self.registry.get(segment)?;
        let canonical = if rest.is_empty() { "/" } else { rest };
        Some((locale, canonical.to_string()))
    }

    fn action_for(
        &self,
        locale: &LocaleConfig,
        canonical_path: &str,
        source: LocaleSource,
    ) -> RouteAction {
        let explicit = source == LocaleSource::Path;
        match (self.prefix, explicit, locale.is_default) {
            (LocalePrefix::Always, true, _) => RouteAction::Continue,
            (LocalePrefix::Always, false, _) => {
                RouteAction::Redirect(prefixed_path(locale.code, canonical_path))
            }
            (LocalePrefix::AsNeeded, true, true) => {
                RouteAction::Redirect(same_origin_path(canonical_path))
            }
            (LocalePrefix::AsNeeded, true, false) => RouteAction::Continue,
            (LocalePrefix::AsNeeded, false, true) => RouteAction::Rewrite,
            (LocalePrefix::AsNeeded, false, false) => {
                RouteAction::Redirect(prefixed_path(locale.code, canonical_path))
            }
        }
    }
}

fn prefixed_path(code: &str, canonical_path: &str) -> String {
    if canonical_path == "/" {
        format!("/{}", code)
    } else {
        format!("/{}{}", code, canonical_path)
    }
}

/// Collapse leading slashes and backslashes so a redirect target can never
/// be read as a protocol-relative URL (`//host/...`).
fn same_origin_path(path: &str) -> String {
    format!("/{}", path.trim_start_matches(['/', '\\']))
}
