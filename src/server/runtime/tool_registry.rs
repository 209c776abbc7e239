use std::sync::Arc;

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolResult, ErrorData, Implementation, ListResourcesResult, PaginatedRequestParam,
        ReadResourceRequestParam, ReadResourceResult, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool_handler, RoleServer,
};
use serde::Serialize;
use serde_json::json;

use crate::{
    bybit::{BybitClient, Endpoint},
    lib::errors::ServerBuildError,
    server::config::ServerConfig,
    tools::{
        self, market, position, trade, ResourceCatalog, ServerToolRouter, ToolDomain,
        ToolRegistry, Validate,
    },
};

/// MCP server exposing the Bybit v5 REST API.
#[derive(Clone)]
pub struct BybitServer {
    client: Arc<BybitClient>,
    instructions: Arc<String>,
    tool_router: ServerToolRouter<Self>,
    resources: Arc<ResourceCatalog>,
}

impl BybitServer {
    /// Build the client, register every tool domain and the static resources.
    pub fn new(config: &ServerConfig, instructions: String) -> Result<Self, ServerBuildError> {
        let client = BybitClient::new(&config.bybit)?;
        let tool_router = build_tool_registry()?;
        let resources = ResourceCatalog::with_defaults()?;
        Ok(Self {
            client: Arc::new(client),
            instructions: Arc::new(instructions),
            tool_router,
            resources: Arc::new(resources),
        })
    }

    pub fn tool_count(&self) -> usize {
        self.tool_router.list_all().len()
    }

    /// Validate `params`, call `endpoint` and wrap the Bybit envelope as the tool result.
    pub(crate) async fn invoke<P>(
        &self,
        endpoint: &Endpoint,
        params: &P,
    ) -> Result<CallToolResult, ErrorData>
    where
        P: Serialize + Validate,
    {
        params
            .validate()
            .map_err(|err| tools::validation_error_to_error_data(endpoint.name, err))?;
        let envelope = self
            .client
            .call(endpoint, params)
            .await
            .map_err(tools::bybit_error_to_error_data)?;
        Ok(CallToolResult::structured(envelope))
    }
}

/// Register market, trading and position tools, in that order.
fn build_tool_registry() -> Result<ServerToolRouter<BybitServer>, ServerBuildError> {
    let mut registry = ToolRegistry::new();
    for domain in ToolDomain::ALL {
        let router = match domain {
            ToolDomain::Market => market::router(),
            ToolDomain::Trade => trade::router(),
            ToolDomain::Position => position::router(),
        };
        registry.register_domain(domain, router)?;
    }
    Ok(registry.into_router())
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for BybitServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "bybit-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::from_build_env()
            },
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult::with_all_items(self.resources.list()))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let uri = request.uri;
        self.resources.read(&uri).ok_or_else(|| {
            ErrorData::resource_not_found(
                format!("Unknown resource: {uri}"),
                Some(json!({ "uri": uri })),
            )
        })
    }
}
