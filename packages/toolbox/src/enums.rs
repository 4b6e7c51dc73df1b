//! Dynamic enums: value sets looked up in the database at call time.

use sakila_query_models::{QueryRow, QueryValue};
use sakila_toolbox_models::{DynEnumRef, EnumName};
use serde::Serialize;

use crate::{ToolboxError, state::State};

/// Default row cap for [`EnumSource::search`].
pub const DEFAULT_ENUM_SEARCH_LIMIT: u32 = 100;

/// One member returned by an enum search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumCandidate {
    /// Integer identifier bound into tool queries.
    pub key: i64,
    /// Caller-facing label.
    pub label: String,
}

impl EnumCandidate {
    /// Reads a `key`/`label` row produced by a lookup query.
    ///
    /// # Errors
    ///
    /// * If `key` is missing or not an integer
    pub fn from_row(row: &QueryRow) -> Result<Self, ToolboxError> {
        let value = row.get("key");
        let key = match (
            value.and_then(QueryValue::as_i64),
            value.and_then(QueryValue::as_str),
        ) {
            (Some(key), _) => key,
            (None, Some(text)) => text.trim().parse().map_err(|_| ToolboxError::Conversion {
                message: format!("enum key '{text}' is not an integer"),
            })?,
            (None, None) => {
                return Err(ToolboxError::Conversion {
                    message: format!("expected integer enum key, got {value:?}"),
                });
            }
        };

        let label = match row.get("label") {
            Some(value) if !value.is_null() => {
                value.as_str().map_or_else(|| value.to_string(), ToString::to_string)
            }
            _ => key.to_string(),
        };

        Ok(Self { key, label })
    }
}

impl From<EnumCandidate> for DynEnumRef {
    fn from(candidate: EnumCandidate) -> Self {
        Self::with_label(candidate.key, candidate.label)
    }
}

/// A dynamic enum backed by a lookup query returning `key` and `label`.
#[async_trait::async_trait]
pub trait EnumSource: Send + Sync {
    /// Registered enum name.
    fn name(&self) -> EnumName;

    /// Lookup query in the catalog.
    fn query_name(&self) -> &'static str;

    /// Returns up to `limit` members whose label contains `query`
    /// (case-insensitive), in ascending key order. An empty query matches
    /// every member.
    ///
    /// # Errors
    ///
    /// * If the executor fails
    /// * If a row lacks an integer key
    async fn search(
        &self,
        state: &State,
        query: &str,
        limit: u32,
    ) -> Result<Vec<EnumCandidate>, ToolboxError> {
        let rows = state.search(self.query_name(), query, true, limit).await?;

        rows.iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(EnumCandidate::from_row)
            .collect()
    }

    /// The first search result for `query`, if any.
    ///
    /// # Errors
    ///
    /// * If the search fails
    async fn find_best_match(
        &self,
        state: &State,
        query: &str,
    ) -> Result<Option<EnumCandidate>, ToolboxError> {
        Ok(self.search(state, query, 1).await?.into_iter().next())
    }
}

/// Film categories from the `category` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilmCategory;

#[async_trait::async_trait]
impl EnumSource for FilmCategory {
    fn name(&self) -> EnumName {
        EnumName::Category
    }

    fn query_name(&self) -> &'static str {
        "category_enum"
    }
}

/// Stores, labelled `Store <id> - <city>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Store;

#[async_trait::async_trait]
impl EnumSource for Store {
    fn name(&self) -> EnumName {
        EnumName::Store
    }

    fn query_name(&self) -> &'static str {
        "store_enum"
    }
}

/// The source backing `name`, or `None` for static enums.
#[must_use]
pub fn enum_source(name: EnumName) -> Option<&'static dyn EnumSource> {
    match name {
        EnumName::Category => Some(&FilmCategory),
        EnumName::Store => Some(&Store),
        EnumName::YesNo => None,
    }
}

/// Parses `name` and returns its source.
///
/// # Errors
///
/// * If `name` is not a dynamic enum
pub fn lookup_enum(name: &str) -> Result<&'static dyn EnumSource, ToolboxError> {
    name.parse::<EnumName>()
        .ok()
        .and_then(enum_source)
        .ok_or_else(|| ToolboxError::UnknownEnum {
            name: name.to_string(),
        })
}
