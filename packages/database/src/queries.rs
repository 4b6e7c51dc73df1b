//! The named-query catalog.
//!
//! Parses `queries.sql` (aiosql layout: a `-- name: <ident>` line opens
//! each query) and rewrites `:name` parameters into the positional `$n`
//! placeholders that `query_raw_params()` expects.

use std::collections::BTreeMap;

use sakila_query_models::{QueryArgs, QueryValue};
use switchy_database::DatabaseValue;

use crate::QueryError;

/// The catalog shipped with the crate.
pub const DEFAULT_QUERIES: &str = include_str!("../queries.sql");

const NAME_MARKER: &str = "-- name:";

/// A single named query with its parameters in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedQuery {
    /// Query identifier.
    pub name: String,
    /// SQL with `$n` placeholders.
    pub sql: String,
    /// Parameter names; `params[0]` binds to `$1`.
    pub params: Vec<String>,
}

impl NamedQuery {
    /// Builds the positional parameter list from keyword arguments.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MissingArgument`] if a parameter has no value
    /// in `args`.
    pub fn bind(&self, args: &QueryArgs) -> Result<Vec<DatabaseValue>, QueryError> {
        self.params
            .iter()
            .map(|name| {
                args.get(name)
                    .map(to_database_value)
                    .ok_or_else(|| QueryError::MissingArgument {
                        query: self.name.clone(),
                        name: name.clone(),
                    })
            })
            .collect()
    }
}

/// All named queries, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct QueryCatalog {
    queries: BTreeMap<String, NamedQuery>,
}

impl QueryCatalog {
    /// Parses the embedded default catalog.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Catalog`] if the embedded file is malformed.
    pub fn load_default() -> Result<Self, QueryError> {
        Self::parse(DEFAULT_QUERIES)
    }

    /// Parses catalog text.
    ///
    /// Lines before the first `-- name:` marker are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Catalog`] on a blank or duplicate name, or a
    /// query with an empty body.
    pub fn parse(source: &str) -> Result<Self, QueryError> {
        let mut sections: Vec<(String, String)> = Vec::new();

        for line in source.lines() {
            if let Some(rest) = line.trim_start().strip_prefix(NAME_MARKER) {
                let name = rest
                    .trim()
                    .trim_end_matches(['^', '$', '!', '*', '<', '#'])
                    .to_string();
                if name.is_empty() {
                    return Err(QueryError::Catalog {
                        message: "query name marker without a name".to_string(),
                    });
                }
                sections.push((name, String::new()));
            } else if let Some((_, body)) = sections.last_mut() {
                body.push_str(line);
                body.push('\n');
            }
        }

        let mut queries = BTreeMap::new();

        for (name, body) in sections {
            let body = body.trim().trim_end_matches(';').trim_end();
            if body.is_empty() {
                return Err(QueryError::Catalog {
                    message: format!("query '{name}' has an empty body"),
                });
            }

            let (sql, params) = translate_params(body);
            let query = NamedQuery {
                name: name.clone(),
                sql,
                params,
            };

            if queries.insert(name.clone(), query).is_some() {
                return Err(QueryError::Catalog {
                    message: format!("duplicate query name '{name}'"),
                });
            }
        }

        Ok(Self { queries })
    }

    /// Looks up a query by name.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownQuery`] if no such query exists.
    pub fn get(&self, name: &str) -> Result<&NamedQuery, QueryError> {
        self.queries
            .get(name)
            .ok_or_else(|| QueryError::UnknownQuery {
                name: name.to_string(),
            })
    }

    /// Query names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.queries.keys().map(String::as_str)
    }

    /// Number of queries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns `true` if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Rewrites `:name` parameters to `$n`.
///
/// A name that appears more than once reuses its first index. `::type`
/// casts, `'...'` string literals, and `--` comments are copied through
/// untouched.
fn translate_params(body: &str) -> (String, Vec<String>) {
    let mut sql = String::with_capacity(body.len());
    let mut params: Vec<String> = Vec::new();
    let mut chars = body.chars().peekable();
    let mut in_literal = false;

    while let Some(ch) = chars.next() {
        if in_literal {
            sql.push(ch);
            if ch == '\'' {
                in_literal = false;
            }
            continue;
        }

        match ch {
            '\'' => {
                in_literal = true;
                sql.push(ch);
            }
            '-' if chars.peek() == Some(&'-') => {
                sql.push(ch);
                for c in chars.by_ref() {
                    sql.push(c);
                    if c == '\n' {
                        break;
                    }
                }
            }
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                sql.push_str("::");
            }
            ':' if chars
                .peek()
                .is_some_and(|c| c.is_ascii_alphabetic() || *c == '_') =>
            {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }

                let idx = params.iter().position(|p| *p == name).unwrap_or_else(|| {
                    params.push(name);
                    params.len() - 1
                });
                sql.push('$');
                sql.push_str(&(idx + 1).to_string());
            }
            _ => sql.push(ch),
        }
    }

    (sql, params)
}

/// Converts a normalized argument into a bindable database value.
///
/// Dates bind as midnight timestamps; the catalog casts date parameters to
/// `timestamp`.
#[must_use]
pub fn to_database_value(value: &QueryValue) -> DatabaseValue {
    match value {
        QueryValue::Null => DatabaseValue::Null,
        QueryValue::Bool(v) => DatabaseValue::Bool(*v),
        QueryValue::Int(v) => DatabaseValue::Int64(*v),
        QueryValue::Real(v) => DatabaseValue::Real64(*v),
        QueryValue::String(v) => DatabaseValue::String(v.clone()),
        QueryValue::Date(v) => DatabaseValue::DateTime(v.and_hms_opt(0, 0, 0).unwrap_or_default()),
        QueryValue::DateTime(v) => DatabaseValue::DateTime(*v),
    }
}
