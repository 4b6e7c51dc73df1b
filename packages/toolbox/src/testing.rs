use std::{collections::BTreeMap, sync::Mutex};

use sakila_database::{QueryError, QueryExecutor};
use sakila_query_models::{QueryArgs, QueryRow, QueryValue};

/// In-memory executor that records every call and replies with canned rows.
#[derive(Debug, Default)]
pub struct MockExecutor {
    rows: BTreeMap<String, Vec<QueryRow>>,
    fail: bool,
    calls: Mutex<Vec<(String, QueryArgs)>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_rows(mut self, query_name: &str, rows: Vec<QueryRow>) -> Self {
        self.rows.insert(query_name.to_string(), rows);
        self
    }

    pub fn calls(&self) -> Vec<(String, QueryArgs)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl QueryExecutor for MockExecutor {
    async fn run_query(
        &self,
        query_name: &str,
        args: &QueryArgs,
    ) -> Result<Vec<QueryRow>, QueryError> {
        self.calls
            .lock()
            .unwrap()
            .push((query_name.to_string(), args.clone()));

        if self.fail {
            return Err(QueryError::Execution {
                message: "connection reset".to_string(),
            });
        }

        let rows = self.rows.get(query_name).cloned().unwrap_or_default();

        // Enum lookups filter with `label ILIKE :value`.
        match args.get("value").and_then(QueryValue::as_str) {
            Some(pattern) if query_name.ends_with("_enum") => Ok(rows
                .into_iter()
                .filter(|row| {
                    row.get("label")
                        .and_then(QueryValue::as_str)
                        .is_some_and(|label| ilike(label, pattern))
                })
                .collect()),
            _ => Ok(rows),
        }
    }
}

/// Case-insensitive SQL `LIKE`: `%` matches any run of characters, `_`
/// exactly one.
pub fn ilike(text: &str, pattern: &str) -> bool {
    fn matches(text: &[char], pattern: &[char]) -> bool {
        match pattern.split_first() {
            None => text.is_empty(),
            Some(('%', rest)) => (0..=text.len()).any(|i| matches(&text[i..], rest)),
            Some(('_', rest)) => !text.is_empty() && matches(&text[1..], rest),
            Some((c, rest)) => text.first() == Some(c) && matches(&text[1..], rest),
        }
    }

    let text: Vec<char> = text.to_lowercase().chars().collect();
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    matches(&text, &pattern)
}

pub fn row(values: &[(&str, QueryValue)]) -> QueryRow {
    values.iter().cloned().collect()
}

pub fn enum_rows(members: &[(i64, &str)]) -> Vec<QueryRow> {
    members
        .iter()
        .map(|(key, label)| row(&[("key", (*key).into()), ("label", (*label).into())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ilike_wildcards() {
        assert!(ilike("Animation", "%%"));
        assert!(ilike("Animation", "%NIM%"));
        assert!(ilike("Animation", "anim%"));
        assert!(ilike("Drama", "dr_ma"));
        assert!(!ilike("Drama", "dr_a"));
        assert!(!ilike("Children", "%a%"));
        assert!(ilike("", "%"));
        assert!(!ilike("", "_"));
    }
}
