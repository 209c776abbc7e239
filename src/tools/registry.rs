//! Name-keyed tool registration across domains.
use std::collections::BTreeMap;

use rmcp::handler::server::router::tool::{ToolRoute, ToolRouter};
use tracing::debug;

use super::{ServerToolRouter, ToolDomain};
use crate::lib::errors::RegistryError;

/// Collects domain routers into one dispatch table, rejecting duplicate names.
pub struct ToolRegistry<S> {
    router: ToolRouter<S>,
    domains: BTreeMap<String, ToolDomain>,
}

impl<S> ToolRegistry<S>
where
    S: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            router: ToolRouter::new(),
            domains: BTreeMap::new(),
        }
    }

    /// Add a single route; fails if its tool name is already taken.
    pub fn register(
        &mut self,
        domain: ToolDomain,
        route: ToolRoute<S>,
    ) -> Result<(), RegistryError> {
        let name = route.attr.name.to_string();
        if let Some(existing) = self.domains.get(&name) {
            return Err(RegistryError::DuplicateTool {
                name,
                existing: *existing,
                incoming: domain,
            });
        }
        self.router.add_route(route);
        self.domains.insert(name, domain);
        Ok(())
    }

    /// Add every route of a domain router and return how many were added.
    pub fn register_domain(
        &mut self,
        domain: ToolDomain,
        router: ServerToolRouter<S>,
    ) -> Result<usize, RegistryError> {
        let mut routes: Vec<ToolRoute<S>> = router.into_iter().collect();
        routes.sort_by(|a, b| a.attr.name.cmp(&b.attr.name));
        let count = routes.len();
        for route in routes {
            self.register(domain, route)?;
        }
        debug!(
            target: "bybit_mcp::runtime",
            domain = %domain,
            tools = count,
            "Registered tool domain"
        );
        Ok(count)
    }

    pub fn into_router(self) -> ServerToolRouter<S> {
        self.router
    }
}

impl<S> Default for ToolRegistry<S>
where
    S: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rmcp::{
        model::{CallToolResult, Content, ErrorData},
        tool, tool_router,
    };

    use super::*;

    #[derive(Clone)]
    struct Probe;

    #[tool_router(router = first_router)]
    impl Probe {
        #[tool(name = "ping", description = "Reply with pong")]
        async fn ping(&self) -> Result<CallToolResult, ErrorData> {
            Ok(CallToolResult::success(vec![Content::text("pong")]))
        }

        #[tool(name = "echo", description = "Reply with echo")]
        async fn echo(&self) -> Result<CallToolResult, ErrorData> {
            Ok(CallToolResult::success(vec![Content::text("echo")]))
        }
    }

    #[tool_router(router = second_router)]
    impl Probe {
        #[tool(name = "ping", description = "Second ping under the same name")]
        async fn ping_again(&self) -> Result<CallToolResult, ErrorData> {
            Ok(CallToolResult::success(vec![Content::text("pong again")]))
        }
    }

    #[test]
    fn registers_every_route_of_a_domain() {
        let mut registry = ToolRegistry::<Probe>::new();
        let added = registry
            .register_domain(ToolDomain::Market, Probe::first_router())
            .expect("unique names register");
        assert_eq!(added, 2);
        assert_eq!(
            registry.domains.keys().collect::<Vec<_>>(),
            vec!["echo", "ping"]
        );
        assert_eq!(registry.domains.get("ping"), Some(&ToolDomain::Market));

        let router = registry.into_router();
        assert_eq!(router.list_all().len(), 2);
    }

    #[test]
    fn duplicate_names_across_domains_are_rejected() {
        let mut registry = ToolRegistry::<Probe>::new();
        registry
            .register_domain(ToolDomain::Market, Probe::first_router())
            .expect("first domain registers");
        let err = registry
            .register_domain(ToolDomain::Trade, Probe::second_router())
            .expect_err("ping is taken");
        assert_eq!(
            err,
            RegistryError::DuplicateTool {
                name: "ping".into(),
                existing: ToolDomain::Market,
                incoming: ToolDomain::Trade,
            }
        );
        assert_eq!(registry.domains.len(), 2);
    }
}
