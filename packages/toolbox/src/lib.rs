#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The tool-invocation pipeline.
//!
//! A tool call flows through argument normalization ([`normalize`]), a
//! single named-query execution ([`state::State::run_query`]), and one of
//! the chart assemblers. Dynamic enum arguments (category, store) are
//! searchable through [`enums::EnumSource`]. [`registry::ToolRegistry`] is
//! the table a transport builds at startup to look tools up by name.

pub mod enums;
pub mod normalize;
pub mod registry;
pub mod state;
pub mod tools;

#[cfg(test)]
mod testing;

use sakila_database::QueryError;
use thiserror::Error;

/// Errors that can occur while invoking a tool or searching an enum.
#[derive(Debug, Error)]
pub enum ToolboxError {
    /// The query executor failed. Propagated unchanged.
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Arguments could not be bound to the tool's parameter types.
    #[error("Invalid arguments for '{tool}': {message}")]
    InvalidArguments {
        /// Tool identifier.
        tool: String,
        /// Description of what went wrong.
        message: String,
    },

    /// No tool with this name is registered.
    #[error("Unknown tool: {name}")]
    UnknownTool {
        /// The requested name.
        name: String,
    },

    /// No searchable enum with this name exists.
    #[error("Unknown enum: {name}")]
    UnknownEnum {
        /// The requested name.
        name: String,
    },

    /// Free text given for an enum argument matched nothing.
    #[error("No {name} matches '{query}'")]
    NoEnumMatch {
        /// Enum name.
        name: String,
        /// The text that was searched for.
        query: String,
    },

    /// A result row did not have the expected shape.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

impl ToolboxError {
    /// Whether the failure happened before any tool query ran, because of
    /// what the caller sent.
    #[must_use]
    pub const fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArguments { .. }
                | Self::UnknownTool { .. }
                | Self::UnknownEnum { .. }
                | Self::NoEnumMatch { .. }
        )
    }
}
