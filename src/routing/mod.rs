//! Locale routing: decides, per request, whether locale handling applies and
//! which locale and canonical path a page request resolves to.
//!
//! - `rules`: static exclusion rules (admin, internal APIs, assets)
//! - `router`: the pure resolution decision tree
//! - `middleware`: axum middleware applying decisions to live requests

mod middleware;
mod router;
mod rules;

pub use middleware::{cookie_value, locale_middleware, ResolvedLocale, LOCALE_COOKIE};
pub use router::{
    InvalidLocalePrefix, LocalePrefix, LocaleRouter, LocaleSource, LocalizedRoute, RouteAction,
    RouteDecision,
};
pub use rules::{ExclusionRules, DEFAULT_EXCLUDED_PREFIXES};
