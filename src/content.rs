//! Localized site content.
//!
//! Documents are grouped by collection (e.g. `projects`) and addressed by
//! slug. A field holding one value per locale, such as
//! `{"en": "Portfolio", "vi": "Trang cá nhân"}`, is resolved to the
//! requested locale when a document is read, falling back to the default
//! locale when the translation is missing or empty.
//!
//! Any non-empty object whose keys are all supported locale codes is read
//! as such a per-locale value, at any depth. Plain data therefore cannot be
//! stored in an object keyed only by locale codes (`{"en": {...}}`); nest it
//! under another key instead. Every per-locale value must carry the default
//! locale, which is checked when the content is loaded.

use crate::i18n::LocaleRegistry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const PROJECTS: &str = "projects";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("document {index} in collection '{collection}' is invalid: {reason}")]
    InvalidDocument {
        collection: String,
        index: usize,
        reason: String,
    },

    #[error("document '{slug}' in collection '{collection}' has unexpected shape: {source}")]
    Shape {
        collection: String,
        slug: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A content document with localized fields resolved for one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub collection: String,
    pub slug: String,
    /// All fields of the document, including `slug`
    pub fields: Value,
}

/// Source of localized content for the rendering layer.
pub trait ContentProvider: Send + Sync {
    /// Fetch one document by slug, localized to `locale`.
    fn fetch_by_slug(
        &self,
        collection: &str,
        slug: &str,
        locale: &str,
    ) -> Result<Option<Document>, ContentError>;

    /// List every document of a collection, localized to `locale`.
    fn list_by_type(&self, collection: &str, locale: &str) -> Result<Vec<Document>, ContentError>;
}

/// Content loaded once from a JSON file of the form
/// `{"<collection>": [{"slug": "...", ...}, ...]}`.
#[derive(Debug, Clone)]
pub struct JsonContentProvider {
    collections: BTreeMap<String, Vec<Map<String, Value>>>,
    locales: Vec<&'static str>,
    default_locale: &'static str,
}

impl JsonContentProvider {
    pub fn from_path(path: impl AsRef<Path>, registry: &LocaleRegistry) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let provider = Self::from_json(&raw, registry)?;
        info!(
            "Loaded content from {} ({} collections)",
            path.display(),
            provider.collections.len()
        );
        Ok(provider)
    }

    pub fn from_json(raw: &str, registry: &LocaleRegistry) -> Result<Self, ContentError> {
        let parsed: BTreeMap<String, Vec<Value>> = serde_json::from_str(raw)?;
        let locales: Vec<&'static str> = registry.list_locales().iter().map(|l| l.code).collect();
        let default_locale = registry.default_locale().code;

        let mut collections = BTreeMap::new();
        for (collection, documents) in parsed {
            let mut checked = Vec::with_capacity(documents.len());
            for (index, document) in documents.into_iter().enumerate() {
                let invalid = |reason: &str| ContentError::InvalidDocument {
                    collection: collection.clone(),
                    index,
                    reason: reason.to_string(),
                };

                let Value::Object(fields) = document else {
                    return Err(invalid("not an object"));
                };
                match fields.get("slug") {
                    Some(Value::String(slug)) if !slug.is_empty() => {}
                    _ => return Err(invalid("missing string field 'slug'")),
                }
                for (key, value) in &fields {
                    if let Some(field) = missing_default(value, key, &locales, default_locale) {
                        return Err(invalid(&format!(
                            "localized field '{}' has no '{}' value",
                            field, default_locale
                        )));
                    }
                }
                checked.push(fields);
            }
            collections.insert(collection, checked);
        }

        Ok(Self {
            collections,
            locales,
            default_locale,
        })
    }

    fn localize_document(&self, collection: &str, fields: &Map<String, Value>, locale: &str) -> Document {
        let fields: Map<String, Value> = fields
            .iter()
            .map(|(key, value)| (key.clone(), self.localize(value, locale)))
            .collect();
        let slug = fields
            .get("slug")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Document {
            collection: collection.to_string(),
            slug,
            fields: Value::Object(fields),
        }
    }

    fn localize(&self, value: &Value, locale: &str) -> Value {
        match value {
            Value::Object(map) if self.is_localized(map) => {
                let pick = |code: &str| map.get(code).filter(|v| !is_blank(v));
                pick(locale)
                    .or_else(|| map.get(self.default_locale))
                    .cloned()
                    .unwrap_or(Value::Null)
            }
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), self.localize(value, locale)))
                    .collect(),
            ),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.localize(item, locale)).collect())
            }
            other => other.clone(),
        }
    }

    fn is_localized(&self, map: &Map<String, Value>) -> bool {
        is_localized(map, &self.locales)
    }
}

/// A map is a localized value when every key is a supported locale code.
fn is_localized(map: &Map<String, Value>, locales: &[&str]) -> bool {
    !map.is_empty() && map.keys().all(|key| locales.contains(&key.as_str()))
}

/// Dotted path of the first localized value under `value` without a
/// non-null default-locale entry.
fn missing_default(value: &Value, path: &str, locales: &[&str], default_locale: &str) -> Option<String> {
    match value {
        Value::Object(map) if is_localized(map, locales) => {
            match map.get(default_locale) {
                None | Some(Value::Null) => Some(path.to_string()),
                Some(_) => None,
            }
        }
        Value::Object(map) => map.iter().find_map(|(key, nested)| {
            missing_default(nested, &format!("{}.{}", path, key), locales, default_locale)
        }),
        Value::Array(items) => items.iter().enumerate().find_map(|(index, item)| {
            missing_default(item, &format!("{}.{}", path, index), locales, default_locale)
        }),
        _ => None,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

impl ContentProvider for JsonContentProvider {
    fn fetch_by_slug(
        &self,
        collection: &str,
        slug: &str,
        locale: &str,
    ) -> Result<Option<Document>, ContentError> {
        let document = self.collections.get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|fields| fields.get("slug").and_then(Value::as_str) == Some(slug))
        });

        Ok(document.map(|fields| self.localize_document(collection, fields, locale)))
    }

    fn list_by_type(&self, collection: &str, locale: &str) -> Result<Vec<Document>, ContentError> {
        Ok(self
            .collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .map(|fields| self.localize_document(collection, fields, locale))
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Portfolio project, as stored in the `projects` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl TryFrom<Document> for Project {
    type Error = ContentError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        serde_json::from_value(document.fields).map_err(|source| ContentError::Shape {
            collection: document.collection,
            slug: document.slug,
            source,
        })
    }
}

/// All projects localized to `locale`, newest first (undated last).
pub fn list_projects(provider: &dyn ContentProvider, locale: &str) -> Result<Vec<Project>, ContentError> {
    let mut projects = provider
        .list_by_type(PROJECTS, locale)?
        .into_iter()
        .map(Project::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    projects.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    Ok(projects)
}
