/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "CHARTLAB_BASE_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Gateway configuration. The base URL is the only environment contract.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
}

impl GatewayConfig {
    /// Normalise a raw base URL (no trailing slash, endpoints append their
    /// own paths).
    pub fn new(raw: &str) -> Self {
        Self {
            base_url: raw.trim_end_matches('/').to_string(),
        }
    }

    /// Read `CHARTLAB_BASE_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::new(raw.trim()),
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        assert_eq!(
            GatewayConfig::new("http://example.com:8000/").base_url,
            "http://example.com:8000"
        );
        assert_eq!(
            GatewayConfig::new("http://example.com").base_url,
            "http://example.com"
        );
    }
}
