//! Accept-Language negotiation against the locale registry.

use crate::i18n::{LocaleConfig, LocaleRegistry};

/// Pick the best supported locale for an `Accept-Language` header value.
///
/// Entries are ranked by their `q` weight (default 1.0, ties keep header
/// order). Entries with `q=0` and the `*` wildcard are ignored. A tag
/// matches a locale either exactly or through its primary subtag, so
/// `vi-VN` selects `vi`.
///
/// # Returns
/// * `Some(&LocaleConfig)` for the highest ranked supported locale
/// * `None` if nothing in the header is supported
pub fn negotiate<'a>(registry: &'a LocaleRegistry, header: &str) -> Option<&'a LocaleConfig> {
    accept_language::parse_with_quality(header)
        .into_iter()
        .filter(|(tag, quality)| *quality > 0.0 && !tag.is_empty() && tag != "*")
        .find_map(|(tag, _)| match_tag(registry, &tag))
}

fn match_tag<'a>(registry: &'a LocaleRegistry, tag: &str) -> Option<&'a LocaleConfig> {
    if let Some(exact) = registry
        .list_locales()
        .iter()
        .find(|locale| locale.code.eq_ignore_ascii_case(tag))
    {
        return Some(exact);
    }

    let primary = tag.split('-').next()?;
    registry
        .list_locales()
        .iter()
        .find(|locale| locale.code.eq_ignore_ascii_case(primary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(header: &str) -> Option<&'static str> {
        let registry = LocaleRegistry::builtin();
        negotiate(&registry, header).map(|l| l.code)
    }

    #[test]
    fn test_exact_match() {
        assert_eq!(code("vi"), Some("vi"));
        assert_eq!(code("en"), Some("en"));
    }

    #[test]
    fn test_primary_subtag_match() {
        assert_eq!(code("vi-VN"), Some("vi"));
        assert_eq!(code("en-GB,en;q=0.9"), Some("en"));
    }

    #[test]
    fn test_quality_ordering() {
        assert_eq!(code("en;q=0.5, vi;q=0.8"), Some("vi"));
        assert_eq!(code("fr, vi;q=0.3, en;q=0.2"), Some("vi"));
    }

    #[test]
    fn test_ties_keep_header_order() {
        assert_eq!(code("vi, en"), Some("vi"));
        assert_eq!(code("en, vi"), Some("en"));
    }

    #[test]
    fn test_zero_quality_ignored() {
        assert_eq!(code("vi;q=0, en;q=0.1"), Some("en"));
        assert_eq!(code("vi;q=0"), None);
    }

    #[test]
    fn test_unsupported_and_wildcard() {
        assert_eq!(code("fr-FR, de"), None);
        assert_eq!(code("*"), None);
        assert_eq!(code(""), None);
    }

    #[test]
    fn test_whitespace_around_entries() {
        assert_eq!(code(" fr ;q=0.9 , vi-VN ; q=0.95"), Some("vi"));
    }
}
