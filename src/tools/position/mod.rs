//! Position management tools.

pub mod endpoints;
pub mod request;

use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ErrorData},
    tool, tool_router,
};

pub use endpoints::ENDPOINTS;
pub use request::{
    ClosedPnlRequest, ModifyPositionMarginRequest, PositionInfoRequest, SetAutoAddMarginRequest,
    SetLeverageRequest, SetTradingStopRequest, SwitchIsolatedRequest, SwitchPositionModeRequest,
};

use super::ServerToolRouter;
use crate::server::runtime::BybitServer;

/// Position-management routes for the registry.
pub fn router() -> ServerToolRouter<BybitServer> {
    BybitServer::position_router()
}

#[tool_router(router = position_router)]
impl BybitServer {
    #[tool(name = "get_position_info", description = "Query open positions")]
    async fn get_position_info(
        &self,
        Parameters(request): Parameters<PositionInfoRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_POSITION_INFO, &request).await
    }

    #[tool(name = "get_closed_pnl", description = "Query closed profit and loss records")]
    async fn get_closed_pnl(
        &self,
        Parameters(request): Parameters<ClosedPnlRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_CLOSED_PNL, &request).await
    }

    #[tool(name = "set_leverage", description = "Set buy and sell leverage for a symbol")]
    async fn set_leverage(
        &self,
        Parameters(request): Parameters<SetLeverageRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::SET_LEVERAGE, &request).await
    }

    #[tool(
        name = "switch_cross_isolated_margin",
        description = "Switch a symbol between cross and isolated margin"
    )]
    async fn switch_cross_isolated_margin(
        &self,
        Parameters(request): Parameters<SwitchIsolatedRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::SWITCH_CROSS_ISOLATED_MARGIN, &request).await
    }

    #[tool(
        name = "switch_position_mode",
        description = "Switch between one-way and hedge position mode"
    )]
    async fn switch_position_mode(
        &self,
        Parameters(request): Parameters<SwitchPositionModeRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::SWITCH_POSITION_MODE, &request).await
    }

    #[tool(
        name = "set_trading_stop",
        description = "Set take profit, stop loss or trailing stop on a position"
    )]
    async fn set_trading_stop(
        &self,
        Parameters(request): Parameters<SetTradingStopRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::SET_TRADING_STOP, &request).await
    }

    #[tool(
        name = "set_auto_add_margin",
        description = "Turn automatic margin top-up on or off for an isolated position"
    )]
    async fn set_auto_add_margin(
        &self,
        Parameters(request): Parameters<SetAutoAddMarginRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::SET_AUTO_ADD_MARGIN, &request).await
    }

    #[tool(
        name = "modify_position_margin",
        description = "Add or reduce margin on an isolated position"
    )]
    async fn modify_position_margin(
        &self,
        Parameters(request): Parameters<ModifyPositionMarginRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::MODIFY_POSITION_MARGIN, &request).await
    }
}
