use crate::bybit::Endpoint;

pub const GET_SERVER_TIME: Endpoint = Endpoint::public_get("get_server_time", "/v5/market/time");
pub const GET_TICKERS: Endpoint = Endpoint::public_get("get_tickers", "/v5/market/tickers");
pub const GET_ORDER_BOOK: Endpoint = Endpoint::public_get("get_order_book", "/v5/market/orderbook");
pub const GET_RECENT_TRADES: Endpoint =
    Endpoint::public_get("get_recent_trades", "/v5/market/recent-trade");
pub const GET_KLINE: Endpoint = Endpoint::public_get("get_kline", "/v5/market/kline");
pub const GET_MARK_PRICE_KLINE: Endpoint =
    Endpoint::public_get("get_mark_price_kline", "/v5/market/mark-price-kline");
pub const GET_INDEX_PRICE_KLINE: Endpoint =
    Endpoint::public_get("get_index_price_kline", "/v5/market/index-price-kline");
pub const GET_PREMIUM_INDEX_PRICE_KLINE: Endpoint = Endpoint::public_get(
    "get_premium_index_price_kline",
    "/v5/market/premium-index-price-kline",
);
pub const GET_INSTRUMENTS_INFO: Endpoint =
    Endpoint::public_get("get_instruments_info", "/v5/market/instruments-info");
pub const GET_FUNDING_RATE_HISTORY: Endpoint =
    Endpoint::public_get("get_funding_rate_history", "/v5/market/funding/history");
pub const GET_OPEN_INTEREST: Endpoint =
    Endpoint::public_get("get_open_interest", "/v5/market/open-interest");
pub const GET_INSURANCE: Endpoint = Endpoint::public_get("get_insurance", "/v5/market/insurance");
pub const GET_RISK_LIMIT: Endpoint =
    Endpoint::public_get("get_risk_limit", "/v5/market/risk-limit");
pub const GET_LONG_SHORT_RATIO: Endpoint =
    Endpoint::public_get("get_long_short_ratio", "/v5/market/account-ratio");

/// Market-data endpoints in registration order.
pub const ENDPOINTS: [Endpoint; 14] = [
    GET_SERVER_TIME,
    GET_TICKERS,
    GET_ORDER_BOOK,
    GET_RECENT_TRADES,
    GET_KLINE,
    GET_MARK_PRICE_KLINE,
    GET_INDEX_PRICE_KLINE,
    GET_PREMIUM_INDEX_PRICE_KLINE,
    GET_INSTRUMENTS_INFO,
    GET_FUNDING_RATE_HISTORY,
    GET_OPEN_INTEREST,
    GET_INSURANCE,
    GET_RISK_LIMIT,
    GET_LONG_SHORT_RATIO,
];
