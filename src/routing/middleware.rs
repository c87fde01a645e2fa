//! HTTP layer for locale routing.
//!
//! Runs in front of the page router: excluded paths are forwarded untouched,
//! everything else is resolved to a locale and either redirected or
//! rewritten onto the internal `/{locale}/...` routes.

use crate::i18n::negotiate;
use crate::routing::{LocaleRouter, LocaleSource, LocalizedRoute, RouteAction, RouteDecision};
use crate::server::AppState;
use axum::extract::{Request, State};
use axum::http::header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE, COOKIE, SET_COOKIE};
use axum::http::uri::PathAndQuery;
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;
use tracing::{debug, warn};

/// Cookie holding the visitor's last explicit locale choice.
pub const LOCALE_COOKIE: &str = "site_locale";

/// One year, in seconds.
const LOCALE_COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 365;

/// Locale resolved for the current request, available to handlers as an
/// extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale {
    pub code: &'static str,
    /// Public path without the locale segment (e.g. `/projects`)
    pub canonical_path: String,
    pub source: LocaleSource,
}

pub async fn locale_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let router = LocaleRouter::new(
        &state.registry,
        &state.exclusions,
        state.config.locale_prefix,
    );

    let path = request.uri().path().to_string();
    let cookie = cookie_value(request.headers(), LOCALE_COOKIE);
    let preference = stored_preference(&state, request.headers(), cookie.as_deref());

    let route = match router.resolve(&path, preference) {
        RouteDecision::PassThrough => {
            debug!("{}: excluded from locale routing", path);
            return next.run(request).await;
        }
        RouteDecision::Localized(route) => route,
    };

    debug!(
        "{}: locale '{}' ({:?}), canonical '{}', {:?}",
        path, route.locale.code, route.source, route.canonical_path, route.action
    );

    let query = request.uri().query().map(str::to_string);
    let set_cookie = needs_cookie(&route, cookie.as_deref());

    let mut response = match &route.action {
        RouteAction::Redirect(location) => {
            Redirect::temporary(&with_query(location, query.as_deref())).into_response()
        }
        RouteAction::Continue | RouteAction::Rewrite => {
            let internal = with_query(&route.internal_path(), query.as_deref());
            if let Err(e) = rewrite_uri(request.uri_mut(), &internal) {
                warn!("{}: cannot rewrite to '{}': {}", path, internal, e);
                return StatusCode::BAD_REQUEST.into_response();
            }

            request.extensions_mut().insert(ResolvedLocale {
                code: route.locale.code,
                canonical_path: route.canonical_path.clone(),
                source: route.source,
            });

            let mut response = next.run(request).await;
            response
                .headers_mut()
                .insert(CONTENT_LANGUAGE, HeaderValue::from_static(route.locale.code));
            response
        }
    };

    if set_cookie {
        let value = format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            LOCALE_COOKIE, route.locale.code, LOCALE_COOKIE_MAX_AGE
        );
        match HeaderValue::from_str(&value) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => warn!("Invalid locale cookie value '{}': {}", value, e),
        }
    }

    response
}

/// Preference consulted when the path carries no locale: the cookie if it
/// names a supported locale, otherwise (when detection is enabled) the
/// best `Accept-Language` match.
fn stored_preference<'a>(
    state: &'a AppState,
    headers: &HeaderMap,
    cookie: Option<&str>,
) -> Option<&'a str> {
    if let Some(locale) = cookie.and_then(|code| state.registry.get(code)) {
        return Some(locale.code);
    }

    if !state.config.locale_detection {
        return None;
    }

    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| negotiate(&state.registry, header))
        .map(|locale| locale.code)
}

/// Only an explicit path locale is remembered, and only when it changes.
fn needs_cookie(route: &LocalizedRoute<'_>, cookie: Option<&str>) -> bool {
    route.source == LocaleSource::Path && cookie != Some(route.locale.code)
}

/// Value of cookie `name` across all `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
}

fn with_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{}?{}", path, query),
        _ => path.to_string(),
    }
}

fn rewrite_uri(uri: &mut Uri, path_and_query: &str) -> Result<(), axum::http::Error> {
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    *uri = Uri::from_parts(parts)?;
    Ok(())
}
