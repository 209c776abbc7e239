use crate::bybit::Endpoint;

pub const GET_POSITION_INFO: Endpoint =
    Endpoint::private_get("get_position_info", "/v5/position/list");
pub const GET_CLOSED_PNL: Endpoint =
    Endpoint::private_get("get_closed_pnl", "/v5/position/closed-pnl");
pub const SET_LEVERAGE: Endpoint =
    Endpoint::private_post("set_leverage", "/v5/position/set-leverage");
pub const SWITCH_CROSS_ISOLATED_MARGIN: Endpoint =
    Endpoint::private_post("switch_cross_isolated_margin", "/v5/position/switch-isolated");
pub const SWITCH_POSITION_MODE: Endpoint =
    Endpoint::private_post("switch_position_mode", "/v5/position/switch-mode");
pub const SET_TRADING_STOP: Endpoint =
    Endpoint::private_post("set_trading_stop", "/v5/position/trading-stop");
pub const SET_AUTO_ADD_MARGIN: Endpoint =
    Endpoint::private_post("set_auto_add_margin", "/v5/position/set-auto-add-margin");
pub const MODIFY_POSITION_MARGIN: Endpoint =
    Endpoint::private_post("modify_position_margin", "/v5/position/add-margin");

/// Position-management endpoints in registration order.
pub const ENDPOINTS: [Endpoint; 8] = [
    GET_POSITION_INFO,
    GET_CLOSED_PNL,
    SET_LEVERAGE,
    SWITCH_CROSS_ISOLATED_MARGIN,
    SWITCH_POSITION_MODE,
    SET_TRADING_STOP,
    SET_AUTO_ADD_MARGIN,
    MODIFY_POSITION_MARGIN,
];
