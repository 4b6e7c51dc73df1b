//! Tool lookup and dispatch.
//!
//! A transport builds one [`ToolRegistry`] at startup. A call goes
//! through schema defaults, free-text enum resolution, then typed
//! parameter binding, and only then reaches the tool.

use std::collections::BTreeMap;

use sakila_charts_models::ChartPayload;
use sakila_toolbox_models::{ToolName, tool_definitions};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{ToolboxError, enums::enum_source, state::State, tools};

fn bind<T: DeserializeOwned>(tool: ToolName, input: Value) -> Result<T, ToolboxError> {
    serde_json::from_value(input).map_err(|e| ToolboxError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

/// Binds `input` to the tool's parameters and runs it.
///
/// # Errors
///
/// * If `input` does not match the tool's parameter types
/// * If the tool's query fails
pub async fn execute_tool(
    state: &State,
    tool: ToolName,
    input: Value,
) -> Result<ChartPayload, ToolboxError> {
    match tool {
        ToolName::ActorWithMostFilms => {
            tools::actor_with_most_films(state, &bind(tool, input)?).await
        }
        ToolName::MonthlyRentalRevenue => {
            tools::monthly_rental_revenue(state, &bind(tool, input)?).await
        }
        ToolName::FilmCategoryDistribution => {
            tools::film_category_distribution(state, &bind(tool, input)?).await
        }
        ToolName::RevenueByCountry => tools::revenue_by_country(state, &bind(tool, input)?).await,
        ToolName::DailyRentalTrendsByCategory => {
            tools::daily_rental_trends_by_category(state, &bind(tool, input)?).await
        }
        ToolName::TopCustomersByRentals => {
            tools::top_customers_by_rentals(state, &bind(tool, input)?).await
        }
        ToolName::FilmLengthDistributionByCategory => {
            tools::film_length_distribution_by_category(state, &bind(tool, input)?).await
        }
    }
}

/// Every registered tool with its caller-facing description.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    definitions: BTreeMap<ToolName, Value>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Registers every tool.
    #[must_use]
    pub fn new() -> Self {
        let definitions = tool_definitions()
            .into_iter()
            .filter_map(|definition| {
                let tool = definition["name"].as_str()?.parse::<ToolName>().ok()?;
                Some((tool, definition))
            })
            .collect();

        Self { definitions }
    }

    /// Tool descriptions, in registration order.
    #[must_use]
    pub fn definitions(&self) -> Vec<&Value> {
        ToolName::ALL
            .iter()
            .filter_map(|tool| self.definitions.get(tool))
            .collect()
    }

    /// Finds a tool by identifier or title.
    ///
    /// # Errors
    ///
    /// * If no registered tool has that name
    pub fn resolve(&self, name: &str) -> Result<ToolName, ToolboxError> {
        ToolName::resolve(name)
            .filter(|tool| self.definitions.contains_key(tool))
            .ok_or_else(|| ToolboxError::UnknownTool {
                name: name.to_string(),
            })
    }

    /// Copies `input` and fills omitted or null arguments from the schema
    /// defaults. A null `input` counts as no arguments.
    ///
    /// # Errors
    ///
    /// * If `input` is neither an object nor null
    pub fn apply_defaults(
        &self,
        tool: ToolName,
        input: &Value,
    ) -> Result<Map<String, Value>, ToolboxError> {
        let mut args = match input {
            Value::Object(args) => args.clone(),
            Value::Null => Map::new(),
            other => {
                return Err(ToolboxError::InvalidArguments {
                    tool: tool.to_string(),
                    message: format!("expected an object of arguments, got {other}"),
                });
            }
        };

        let properties = self
            .definitions
            .get(&tool)
            .and_then(|definition| definition["parameters"]["properties"].as_object());

        for (name, schema) in properties.into_iter().flatten() {
            let Some(default) = schema.get("default") else {
                continue;
            };
            if args.get(name).is_none_or(Value::is_null) {
                args.insert(name.clone(), default.clone());
            }
        }

        Ok(args)
    }

    /// Replaces free-text dynamic enum arguments with their best match.
    ///
    /// Integer keys, numeric strings and `{key, label}` objects are left
    /// as they are. A blank string is treated as omitted.
    ///
    /// # Errors
    ///
    /// * If free text matches no member
    /// * If the lookup query fails
    pub async fn resolve_enum_arguments(
        &self,
        state: &State,
        tool: ToolName,
        args: &mut Map<String, Value>,
    ) -> Result<(), ToolboxError> {
        for (arg, enum_name) in tool.dynamic_enum_arguments() {
            let Some(Value::String(text)) = args.get(*arg) else {
                continue;
            };
            let text = text.trim().to_string();

            if text.is_empty() {
                args.remove(*arg);
                continue;
            }
            if text.parse::<i64>().is_ok() {
                continue;
            }
            let Some(source) = enum_source(*enum_name) else {
                continue;
            };

            let candidate = source.find_best_match(state, &text).await?.ok_or_else(|| {
                ToolboxError::NoEnumMatch {
                    name: enum_name.to_string(),
                    query: text.clone(),
                }
            })?;

            log::debug!(
                "Resolved {arg}='{text}' to {} ({})",
                candidate.key,
                candidate.label
            );
            args.insert(
                (*arg).to_string(),
                serde_json::json!({ "key": candidate.key, "label": candidate.label }),
            );
        }

        Ok(())
    }

    /// Looks up, prepares and runs a tool.
    ///
    /// # Errors
    ///
    /// * If the tool is unknown
    /// * If the arguments are invalid or an enum argument matches nothing
    /// * If a query fails
    pub async fn call(
        &self,
        state: &State,
        name: &str,
        input: &Value,
    ) -> Result<ChartPayload, ToolboxError> {
        let tool = self.resolve(name)?;
        let mut args = self.apply_defaults(tool, input)?;
        self.resolve_enum_arguments(state, tool, &mut args).await?;

        log::info!("Calling tool {tool}");

        let chart = execute_tool(state, tool, Value::Object(args)).await?;
        log::debug!("Tool {tool} produced {} rows", chart.row_count());

        Ok(chart)
    }
}
