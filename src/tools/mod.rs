//! MCP tools registered on the server and helper functions for the router.

pub mod errors;
pub mod market;
pub mod position;
pub mod registry;
pub mod resources;
pub mod trade;
pub mod validation;

use std::fmt;

use rmcp::handler::server::router::tool::ToolRouter;
use serde::Serialize;

pub use errors::{bybit_error_to_error_data, validation_error_to_error_data};
pub use registry::ToolRegistry;
pub use resources::{ResourceCatalog, StaticResource, MARKET_INFO_URI};
pub use validation::{RequestValidationError, Validate};

pub type ServerToolRouter<S> = ToolRouter<S>;

/// Body for endpoints that take no parameters.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoParams {}

impl Validate for NoParams {}

/// Endpoint family a tool belongs to, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolDomain {
    Market,
    Trade,
    Position,
}

impl ToolDomain {
    pub const ALL: [ToolDomain; 3] = [ToolDomain::Market, ToolDomain::Trade, ToolDomain::Position];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ToolDomain::Market => "market",
            ToolDomain::Trade => "trade",
            ToolDomain::Position => "position",
        }
    }
}

impl fmt::Display for ToolDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
