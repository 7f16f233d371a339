//! Configuration for kemasd.
//!
//! Everything comes from the environment; there is no config file and no
//! CLI surface. Credentials are optional at load time - a daemon started
//! without them serves health checks and rejects normalization requests
//! with a configuration error.

/// Default action-table identifier on the upstream service.
pub const DEFAULT_TABLE_ID: &str = "malay_text_normalization";

/// Default upstream API base URL.
pub const DEFAULT_API_URL: &str = "https://api.jamaibase.com";

/// Bind to localhost only by default.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7870";

#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for the upstream service (`JAMAI_BASE_API_KEY`).
    pub api_key: Option<String>,
    /// Upstream project identifier (`JAMAI_BASE_PROJECT_ID`).
    pub project_id: Option<String>,
    /// Target action table (`JAMAI_BASE_TABLE_ID`).
    pub table_id: String,
    /// Upstream API base URL (`JAMAI_BASE_API_URL`).
    pub api_url: String,
    /// Listen address (`KEMASD_BIND`).
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup. Blank values count as unset.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let nonblank = |value: Option<String>| value.filter(|s| !s.trim().is_empty());

        Self {
            api_key: nonblank(lookup("JAMAI_BASE_API_KEY")),
            project_id: nonblank(lookup("JAMAI_BASE_PROJECT_ID")),
            table_id: nonblank(lookup("JAMAI_BASE_TABLE_ID"))
                .unwrap_or_else(|| DEFAULT_TABLE_ID.to_string()),
            api_url: nonblank(lookup("JAMAI_BASE_API_URL"))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            bind_addr: nonblank(lookup("KEMASD_BIND"))
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        }
    }

    /// Both credentials, or None if either is missing.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.api_key.as_deref()?, self.project_id.as_deref()?))
    }
}
