//! Static descriptors for Bybit v5 REST endpoints.

/// HTTP verb used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Whether an endpoint needs signed requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Private,
}

/// One Bybit REST operation, keyed by the MCP tool name that exposes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub access: Access,
}

impl Endpoint {
    pub const fn public_get(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            method: HttpMethod::Get,
            path,
            access: Access::Public,
        }
    }

    pub const fn private_get(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            method: HttpMethod::Get,
            path,
            access: Access::Private,
        }
    }

    pub const fn private_post(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            method: HttpMethod::Post,
            path,
            access: Access::Private,
        }
    }

    pub const fn requires_auth(&self) -> bool {
        matches!(self.access, Access::Private)
    }
}
