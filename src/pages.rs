//! Page models for the localized routes.
//!
//! Handlers are mounted on `/:locale/...`; the locale middleware rewrites
//! public URLs onto these paths and attaches a [`ResolvedLocale`]. The JSON
//! they return carries everything the front end needs to render a page:
//! localized strings, the language picker and the page's content.

use crate::content::{self, ContentError, Project, PROJECTS};
use crate::i18n::{LocaleConfig, SiteStrings};
use crate::routing::ResolvedLocale;
use crate::server::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("page not found")]
    NotFound,

    #[error(transparent)]
    Content(#[from] ContentError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
            }
            PageError::Content(e) => {
                error!("Content error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Entry of the language picker
#[derive(Debug, Clone, Serialize)]
pub struct LanguageOption {
    pub code: &'static str,
    pub label: &'static str,
    pub flag: &'static str,
    /// Same page in this language
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub locale: &'static str,
    pub path: String,
    pub strings: &'static SiteStrings,
    pub languages: Vec<LanguageOption>,
    pub content: T,
}

#[derive(Debug, Serialize)]
pub struct HomeContent {
    pub featured_projects: Vec<Project>,
}

/// `GET /:locale`
pub async fn home(
    State(state): State<Arc<AppState>>,
    Path(locale): Path<String>,
    resolved: Option<Extension<ResolvedLocale>>,
) -> Result<Json<Page<HomeContent>>, PageError> {
    let resolved = resolved_locale(resolved)?;
    let locale = supported_locale(&state, &locale)?;
    let featured_projects = content::list_projects(state.content.as_ref(), locale.code)?
        .into_iter()
        .filter(|project| project.is_featured)
        .collect();

    Ok(Json(page(&state, locale, &resolved, HomeContent { featured_projects })))
}

/// `GET /:locale/projects`
pub async fn projects(
    State(state): State<Arc<AppState>>,
    Path(locale): Path<String>,
    resolved: Option<Extension<ResolvedLocale>>,
) -> Result<Json<Page<Vec<Project>>>, PageError> {
    let resolved = resolved_locale(resolved)?;
    let locale = supported_locale(&state, &locale)?;
    let projects = content::list_projects(state.content.as_ref(), locale.code)?;

    Ok(Json(page(&state, locale, &resolved, projects)))
}

/// `GET /:locale/projects/:slug`
pub async fn project_detail(
    State(state): State<Arc<AppState>>,
    Path((locale, slug)): Path<(String, String)>,
    resolved: Option<Extension<ResolvedLocale>>,
) -> Result<Json<Page<Project>>, PageError> {
    let resolved = resolved_locale(resolved)?;
    let locale = supported_locale(&state, &locale)?;
    let project: Project = state
        .content
        .fetch_by_slug(PROJECTS, &slug, locale.code)?
        .ok_or(PageError::NotFound)?
        .try_into()?;

    Ok(Json(page(&state, locale, &resolved, project)))
}

/// Only requests that went through locale routing are pages; excluded
/// paths such as `/admin` must not be served by the `/:locale` routes.
fn resolved_locale(extension: Option<Extension<ResolvedLocale>>) -> Result<ResolvedLocale, PageError> {
    extension
        .map(|Extension(resolved)| resolved)
        .ok_or(PageError::NotFound)
}

fn supported_locale<'a>(state: &'a AppState, code: &str) -> Result<&'a LocaleConfig, PageError> {
    state.registry.get(code).ok_or(PageError::NotFound)
}

fn page<T: Serialize>(
    state: &AppState,
    locale: &LocaleConfig,
    resolved: &ResolvedLocale,
    content: T,
) -> Page<T> {
    Page {
        locale: locale.code,
        path: state.config.locale_prefix.href(locale, &resolved.canonical_path),
        strings: SiteStrings::for_locale(locale.code),
        languages: language_options(state, locale, &resolved.canonical_path),
        content,
    }
}

fn language_options(
    state: &AppState,
    current: &LocaleConfig,
    canonical_path: &str,
) -> Vec<LanguageOption> {
    state
        .registry
        .list_locales()
        .iter()
        .map(|locale| LanguageOption {
            code: locale.code,
            label: locale.label,
            flag: locale.flag,
            href: state
                .config
                .locale_prefix
                .switch_href(current, locale, canonical_path),
            active: locale.code == current.code,
        })
        .collect()
}
