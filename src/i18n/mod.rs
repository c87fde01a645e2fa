//! Internationalization (i18n) module for the site's locales.
//!
//! # Architecture
//!
//! - `registry`: Validated, immutable table of supported locales and the default
//! - `negotiation`: `Accept-Language` matching against the registry
//! - `strings`: Localized UI strings used by the page models
//!
//! # Example
//!
//! ```rust,ignore
//! use portfolio_site::i18n::LocaleRegistry;
//!
//! let registry = LocaleRegistry::builtin();
//! assert!(registry.is_supported("vi"));
//! assert_eq!(registry.default_locale().code, "en");
//! ```

mod negotiation;
mod registry;
mod strings;

pub use negotiation::negotiate;
pub use registry::{ConfigurationError, LocaleConfig, LocaleRegistry};
pub use strings::SiteStrings;
