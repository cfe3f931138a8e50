//! Tool registry and dispatcher.
//!
//! Every call produces exactly one text content item. Validation failures,
//! unknown tools and handler errors are rendered as text too, so a tool call
//! never fails at the protocol level.

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::handlers::{RequestScope, WeatherApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Alerts,
    Forecast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
}

impl ParamType {
    fn as_str(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamType,
    pub description: &'static str,
    pub required: bool,
}

/// Static description of a tool, as advertised by `tools/list`.
#[derive(Debug, Clone, Copy)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    pub kind: ToolKind,
}

pub const TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "get_alerts",
        description: "Get weather alerts for a US state.",
        params: &[ParamSpec {
            name: "state",
            kind: ParamType::String,
            description: "Two-letter US state code (e.g. CA, NY)",
            required: true,
        }],
        kind: ToolKind::Alerts,
    },
    ToolDescriptor {
        name: "get_forecast",
        description: "Get weather forecast for a location.",
        params: &[
            ParamSpec {
                name: "latitude",
                kind: ParamType::Number,
                description: "Latitude of the location",
                required: true,
            },
            ParamSpec {
                name: "longitude",
                kind: ParamType::Number,
                description: "Longitude of the location",
                required: true,
            },
        ],
        kind: ToolKind::Forecast,
    },
];

impl ToolDescriptor {
    /// JSON schema of the tool arguments
    pub fn input_schema(&self) -> JsonObject {
        let properties: JsonObject = self
            .params
            .iter()
            .map(|p| {
                (
                    p.name.to_string(),
                    json!({ "type": p.kind.as_str(), "description": p.description }),
                )
            })
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        let mut schema = JsonObject::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("required".into(), json!(required));
        schema.insert("properties".into(), Value::Object(properties));
        schema
    }

    pub fn to_tool(&self) -> Tool {
        Tool::new(self.name, self.description, self.input_schema())
    }

    /// First required parameter that is absent, null or blank.
    fn check_required(&self, arguments: &JsonObject) -> Result<(), ToolError> {
        match self
            .params
            .iter()
            .find(|p| p.required && is_missing(arguments.get(p.name)))
        {
            Some(param) => Err(ToolError::MissingArgument(param.name)),
            None => Ok(()),
        }
    }
}

pub fn find_tool(name: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|t| t.name == name)
}

pub fn list_tools() -> Vec<Tool> {
    TOOLS.iter().map(ToolDescriptor::to_tool).collect()
}

/// Validates and runs a tool call, wrapping the outcome in the response envelope.
pub async fn call_tool(
    api: &WeatherApi,
    name: &str,
    arguments: &JsonObject,
    scope: &RequestScope,
) -> CallToolResult {
    tracing::info!(tool = name, "Tool call received");

    let text = match dispatch(api, name, arguments, scope).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(tool = name, error = %e, "Tool call failed");
            e.to_string()
        }
    };

    CallToolResult::success(vec![Content::text(text)])
}

async fn dispatch(
    api: &WeatherApi,
    name: &str,
    arguments: &JsonObject,
    scope: &RequestScope,
) -> Result<String, ToolError> {
    let tool = find_tool(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
    tool.check_required(arguments)?;

    match tool.kind {
        ToolKind::Alerts => {
            let state = arguments
                .get("state")
                .and_then(Value::as_str)
                .ok_or(ToolError::InvalidArgument {
                    field: "state",
                    expected: "string",
                })?;
            api.get_alerts(state).await
        }
        ToolKind::Forecast => {
            let (latitude, longitude) = coordinates(arguments)?;
            api.get_forecast(latitude, longitude, scope).await
        }
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Parses and range-checks latitude/longitude. Numeric strings are accepted.
fn coordinates(arguments: &JsonObject) -> Result<(f64, f64), ToolError> {
    let latitude = number(arguments.get("latitude"))?;
    let longitude = number(arguments.get("longitude"))?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(ToolError::InvalidCoordinates);
    }
    Ok((latitude, longitude))
}

fn number(value: Option<&Value>) -> Result<f64, ToolError> {
    match value {
        Some(Value::Number(n)) => n.as_f64().ok_or(ToolError::NonNumericCoordinates),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ToolError::NonNumericCoordinates),
        _ => Err(ToolError::NonNumericCoordinates),
    }
}
