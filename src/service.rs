use anyhow::Result;
use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Extensions, Implementation, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer,
};

use crate::config::Config;
use crate::constants::API_KEY_HEADER;
use crate::handlers::{RequestScope, WeatherApi};
use crate::tools;

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    api: WeatherApi,
}

impl Weather {
    /// Creates a new Weather service instance
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            api: WeatherApi::new(config)?,
        })
    }
}

/// Pulls per-request settings out of the HTTP request, when there is one.
///
/// The streamable HTTP transport stores the request parts in the context
/// extensions; stdio requests carry none and get an empty scope.
fn request_scope(extensions: &Extensions) -> RequestScope {
    let api_key = extensions
        .get::<http::request::Parts>()
        .and_then(|parts| parts.headers.get(API_KEY_HEADER))
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string);

    RequestScope { api_key }
}

impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-weather-tools".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather tools: active US weather alerts from the National Weather Service \
                and current conditions worldwide from OpenWeatherMap."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(tools::list_tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context.extensions);
        let arguments = request.arguments.unwrap_or_default();

        Ok(tools::call_tool(&self.api, &request.name, &arguments, &scope).await)
    }
}
