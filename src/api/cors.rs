use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Parsed cross-origin setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// `*` (or unset): every origin.
    Any,
    /// Exact origins, e.g. `https://counter.example.com`.
    List(Vec<HeaderValue>),
}

impl AllowedOrigins {
    /// Parse `*`, an empty string, or a comma-separated list of origins.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "*" {
            return Ok(AllowedOrigins::Any);
        }

        let origins = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                if origin == "*" {
                    return Err("'*' cannot be combined with explicit origins".to_string());
                }
                HeaderValue::from_str(origin)
                    .map_err(|e| format!("Invalid CORS origin '{}': {}", origin, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AllowedOrigins::List(origins))
    }

    pub fn layer(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any);
        match self {
            AllowedOrigins::Any => layer.allow_origin(Any),
            AllowedOrigins::List(origins) => layer.allow_origin(AllowOrigin::list(origins.clone())),
        }
    }
}
