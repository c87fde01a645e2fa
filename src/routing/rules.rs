//! Exclusion rules: paths that never go through locale handling.

/// Prefixes excluded from locale routing by default: the public API, the
/// site's own web API (contact form), framework assets and the admin panel.
pub const DEFAULT_EXCLUDED_PREFIXES: [&str; 4] = ["/api", "/web-api", "/_next", "/admin"];

/// Static set of rules marking a request path as non-localizable.
///
/// A path is excluded when it starts with one of the prefixes, or when it
/// contains a `.` anywhere (treated as a static asset such as
/// `/favicon.ico` or `/images/me.png`).
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    prefixes: Vec<String>,
}

impl ExclusionRules {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Check whether `path` is excluded from locale handling.
    ///
    /// Prefixes are matched as plain string prefixes, so `/administrator`
    /// is excluded by `/admin` as well.
    pub fn is_excluded(&self, path: &str) -> bool {
        path.contains('.')
            || self
                .prefixes
                .iter()
                .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_PREFIXES)
    }
}
