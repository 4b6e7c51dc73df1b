#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the toolbox server.
//!
//! Chart payloads and tool definitions are served as produced by the
//! toolbox; only the envelope types live here.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
    /// Namespace the tools are registered under.
    pub namespace: String,
    /// Caller-facing toolbox title.
    pub title: String,
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Query parameters for the enum search and best-match endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnumSearchParams {
    /// Text to look for in member labels. Empty matches every member.
    #[serde(default)]
    pub query: String,
    /// Maximum number of members to return.
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_default_to_empty_query() {
        let params: EnumSearchParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(params.query, "");
        assert_eq!(params.limit, None);
    }

    #[test]
    fn error_body_shape() {
        assert_eq!(
            serde_json::to_value(ApiError::new("Unknown tool: x")).unwrap(),
            serde_json::json!({ "error": "Unknown tool: x" })
        );
    }
}
