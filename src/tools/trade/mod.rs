//! Order placement, order queries and account balance tools.
//!
//! Every endpoint here is private and needs API credentials.

pub mod endpoints;
pub mod request;

use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ErrorData},
    tool, tool_router,
};

pub use endpoints::ENDPOINTS;
pub use request::{
    AmendEntry, AmendOrderRequest, BatchAmendOrderRequest, BatchCancelOrderRequest,
    BatchPlaceOrderRequest, CancelAllOrdersRequest, CancelEntry, CancelOrderRequest,
    OpenOrdersRequest, OrderEntry, OrderHistoryRequest, PlaceOrderRequest,
    PlaceTriggerOrderRequest, SingleCoinBalanceRequest, TradeHistoryRequest,
    WalletBalanceRequest,
};

use super::{NoParams, ServerToolRouter};
use crate::server::runtime::BybitServer;

/// Trading routes for the registry.
pub fn router() -> ServerToolRouter<BybitServer> {
    BybitServer::trade_router()
}

#[tool_router(router = trade_router)]
impl BybitServer {
    #[tool(name = "place_order", description = "Place a market or limit order")]
    async fn place_order(
        &self,
        Parameters(request): Parameters<PlaceOrderRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::PLACE_ORDER, &request).await
    }

    #[tool(
        name = "amend_order",
        description = "Amend quantity, price or TP/SL of an open order"
    )]
    async fn amend_order(
        &self,
        Parameters(request): Parameters<AmendOrderRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::AMEND_ORDER, &request).await
    }

    #[tool(name = "cancel_order", description = "Cancel one open order")]
    async fn cancel_order(
        &self,
        Parameters(request): Parameters<CancelOrderRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::CANCEL_ORDER, &request).await
    }

    #[tool(
        name = "get_open_closed_orders",
        description = "Query open orders and recently closed orders"
    )]
    async fn get_open_closed_orders(
        &self,
        Parameters(request): Parameters<OpenOrdersRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_OPEN_CLOSED_ORDERS, &request).await
    }

    #[tool(
        name = "cancel_all_orders",
        description = "Cancel all open orders for a category, symbol or coin"
    )]
    async fn cancel_all_orders(
        &self,
        Parameters(request): Parameters<CancelAllOrdersRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::CANCEL_ALL_ORDERS, &request).await
    }

    #[tool(name = "get_order_history", description = "Query historical orders")]
    async fn get_order_history(
        &self,
        Parameters(request): Parameters<OrderHistoryRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_ORDER_HISTORY, &request).await
    }

    #[tool(name = "get_trade_history", description = "Query own executions")]
    async fn get_trade_history(
        &self,
        Parameters(request): Parameters<TradeHistoryRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_TRADE_HISTORY, &request).await
    }

    #[tool(
        name = "batch_place_order",
        description = "Place up to 20 orders (10 for spot) in one request"
    )]
    async fn batch_place_order(
        &self,
        Parameters(request): Parameters<BatchPlaceOrderRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::BATCH_PLACE_ORDER, &request).await
    }

    #[tool(
        name = "batch_amend_order",
        description = "Amend up to 20 orders (10 for spot) in one request"
    )]
    async fn batch_amend_order(
        &self,
        Parameters(request): Parameters<BatchAmendOrderRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::BATCH_AMEND_ORDER, &request).await
    }

    #[tool(
        name = "batch_cancel_order",
        description = "Cancel up to 20 orders (10 for spot) in one request"
    )]
    async fn batch_cancel_order(
        &self,
        Parameters(request): Parameters<BatchCancelOrderRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::BATCH_CANCEL_ORDER, &request).await
    }

    #[tool(
        name = "get_wallet_balance",
        description = "Get wallet balance and margin figures for an account type"
    )]
    async fn get_wallet_balance(
        &self,
        Parameters(request): Parameters<WalletBalanceRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_WALLET_BALANCE, &request).await
    }

    #[tool(
        name = "get_single_coin_balance",
        description = "Get the balance of one coin in an account type"
    )]
    async fn get_single_coin_balance(
        &self,
        Parameters(request): Parameters<SingleCoinBalanceRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_SINGLE_COIN_BALANCE, &request).await
    }

    #[tool(
        name = "get_account_info",
        description = "Get margin mode and account status"
    )]
    async fn get_account_info(&self) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_ACCOUNT_INFO, &NoParams {}).await
    }

    #[tool(
        name = "place_trigger_order",
        description = "Place a conditional order released when the trigger price is reached"
    )]
    async fn place_trigger_order(
        &self,
        Parameters(request): Parameters<PlaceTriggerOrderRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::PLACE_TRIGGER_ORDER, &request.body()).await
    }
}
