//! Public market-data tools (`/v5/market/*`).

pub mod endpoints;
pub mod request;

use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ErrorData},
    tool, tool_router,
};

pub use endpoints::ENDPOINTS;
pub use request::{
    FundingRateHistoryRequest, InstrumentsInfoRequest, InsuranceRequest, KlineRequest,
    LongShortRatioRequest, OpenInterestRequest, OrderBookRequest, RecentTradesRequest,
    RiskLimitRequest, TickersRequest,
};

use super::{NoParams, ServerToolRouter};
use crate::server::runtime::BybitServer;

/// Market-data routes for the registry.
pub fn router() -> ServerToolRouter<BybitServer> {
    BybitServer::market_router()
}

#[tool_router(router = market_router)]
impl BybitServer {
    #[tool(name = "get_server_time", description = "Get Bybit server time")]
    async fn get_server_time(&self) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_SERVER_TIME, &NoParams {}).await
    }

    #[tool(
        name = "get_tickers",
        description = "Get latest price snapshot, best bid/ask and 24h volume for a category or symbol"
    )]
    async fn get_tickers(
        &self,
        Parameters(request): Parameters<TickersRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_TICKERS, &request).await
    }

    #[tool(name = "get_order_book", description = "Get order book depth for a symbol")]
    async fn get_order_book(
        &self,
        Parameters(request): Parameters<OrderBookRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_ORDER_BOOK, &request).await
    }

    #[tool(name = "get_recent_trades", description = "Get recent public trades")]
    async fn get_recent_trades(
        &self,
        Parameters(request): Parameters<RecentTradesRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_RECENT_TRADES, &request).await
    }

    #[tool(name = "get_kline", description = "Get traded-price klines (candlesticks)")]
    async fn get_kline(
        &self,
        Parameters(request): Parameters<KlineRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_KLINE, &request).await
    }

    #[tool(name = "get_mark_price_kline", description = "Get mark-price klines")]
    async fn get_mark_price_kline(
        &self,
        Parameters(request): Parameters<KlineRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_MARK_PRICE_KLINE, &request).await
    }

    #[tool(name = "get_index_price_kline", description = "Get index-price klines")]
    async fn get_index_price_kline(
        &self,
        Parameters(request): Parameters<KlineRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_INDEX_PRICE_KLINE, &request).await
    }

    #[tool(
        name = "get_premium_index_price_kline",
        description = "Get premium-index-price klines (linear contracts)"
    )]
    async fn get_premium_index_price_kline(
        &self,
        Parameters(request): Parameters<KlineRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_PREMIUM_INDEX_PRICE_KLINE, &request).await
    }

    #[tool(
        name = "get_instruments_info",
        description = "Get instrument specifications (tick size, lot size, leverage filters)"
    )]
    async fn get_instruments_info(
        &self,
        Parameters(request): Parameters<InstrumentsInfoRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_INSTRUMENTS_INFO, &request).await
    }

    #[tool(
        name = "get_funding_rate_history",
        description = "Get historical funding rates for a perpetual contract"
    )]
    async fn get_funding_rate_history(
        &self,
        Parameters(request): Parameters<FundingRateHistoryRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_FUNDING_RATE_HISTORY, &request).await
    }

    #[tool(name = "get_open_interest", description = "Get open interest history")]
    async fn get_open_interest(
        &self,
        Parameters(request): Parameters<OpenInterestRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_OPEN_INTEREST, &request).await
    }

    #[tool(name = "get_insurance", description = "Get insurance fund balances")]
    async fn get_insurance(
        &self,
        Parameters(request): Parameters<InsuranceRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_INSURANCE, &request).await
    }

    #[tool(name = "get_risk_limit", description = "Get risk limit tiers")]
    async fn get_risk_limit(
        &self,
        Parameters(request): Parameters<RiskLimitRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_RISK_LIMIT, &request).await
    }

    #[tool(
        name = "get_long_short_ratio",
        description = "Get the long/short account ratio for a symbol"
    )]
    async fn get_long_short_ratio(
        &self,
        Parameters(request): Parameters<LongShortRatioRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&endpoints::GET_LONG_SHORT_RATIO, &request).await
    }
}
