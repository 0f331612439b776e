/// Runtime configuration for token signing and verification.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Lifetime of access tokens in seconds.
    pub access_ttl_seconds: i64,
    /// Lifetime of refresh tokens in seconds.
    pub refresh_ttl_seconds: i64,
    /// Allowable clock skew in seconds when validating exp.
    pub leeway_seconds: u32,
}

impl TokenConfig {
    /// Construct config with default lifetimes (15 minute access tokens,
    /// 7 day refresh tokens) and no expiry leeway.
    pub fn new() -> Self {
        Self {
            access_ttl_seconds: 15 * 60,
            refresh_ttl_seconds: 7 * 24 * 60 * 60,
            leeway_seconds: 0,
        }
    }

    pub fn with_access_ttl(mut self, seconds: i64) -> Self {
        self.access_ttl_seconds = seconds;
        self
    }

    pub fn with_refresh_ttl(mut self, seconds: i64) -> Self {
        self.refresh_ttl_seconds = seconds;
        self
    }

    /// Adjust the allowed leeway.
    pub fn with_leeway(mut self, seconds: u32) -> Self {
        self.leeway_seconds = seconds;
        self
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::new()
    }
}
