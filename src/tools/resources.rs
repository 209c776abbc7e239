//! Static MCP resources.
use std::collections::BTreeMap;

use rmcp::model::{AnnotateAble, RawResource, ReadResourceResult, Resource, ResourceContents};

use crate::lib::errors::RegistryError;

pub const MARKET_INFO_URI: &str = "bybit://market/info";
pub const MARKET_INFO_NAME: &str = "Bybit Market Information";

const MARKET_INFO_TEXT: &str = concat!(
    "# Bybit MCP Server\n\n",
    "This MCP server provides access to Bybit's v5 Market API endpoints.\n\n",
    "## Available Endpoints:\n",
    "- get_server_time\n- get_tickers\n- get_order_book\n- get_recent_trades\n",
    "- get_kline\n- get_mark_price_kline\n- get_index_price_kline\n",
    "- get_premium_index_price_kline\n- get_instruments_info\n",
    "- get_funding_rate_history\n- get_open_interest\n- get_insurance\n",
    "- get_risk_limit\n- get_long_short_ratio\n",
);

/// Text resource whose content is fixed at build time.
#[derive(Debug, Clone, Copy)]
pub struct StaticResource {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
    pub producer: fn() -> &'static str,
}

impl StaticResource {
    fn descriptor(&self) -> Resource {
        let mut raw = RawResource::new(self.uri, self.name);
        raw.description = Some(self.description.to_string());
        raw.mime_type = Some(self.mime_type.to_string());
        raw.no_annotation()
    }
}

pub fn market_info() -> &'static str {
    MARKET_INFO_TEXT
}

pub fn market_info_resource() -> StaticResource {
    StaticResource {
        uri: MARKET_INFO_URI,
        name: MARKET_INFO_NAME,
        description: "Market-data tools exposed by this server",
        mime_type: "text/plain",
        producer: market_info,
    }
}

/// URI-keyed set of static resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    entries: BTreeMap<&'static str, StaticResource>,
}

impl ResourceCatalog {
    /// Catalog holding every resource this server publishes.
    pub fn with_defaults() -> Result<Self, RegistryError> {
        let mut catalog = Self::default();
        catalog.register_resource(market_info_resource())?;
        Ok(catalog)
    }

    pub fn register_resource(&mut self, resource: StaticResource) -> Result<(), RegistryError> {
        if self.entries.contains_key(resource.uri) {
            return Err(RegistryError::DuplicateResource {
                uri: resource.uri.to_string(),
            });
        }
        self.entries.insert(resource.uri, resource);
        Ok(())
    }

    pub fn list(&self) -> Vec<Resource> {
        self.entries.values().map(StaticResource::descriptor).collect()
    }

    /// `None` when `uri` is not registered.
    pub fn read(&self, uri: &str) -> Option<ReadResourceResult> {
        let resource = self.entries.get(uri)?;
        Some(ReadResourceResult {
            contents: vec![ResourceContents::text((resource.producer)(), resource.uri)],
        })
    }
}
