use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide configuration, built once at startup and passed by
/// reference into each component constructor. Pipeline code never reads
/// the environment directly.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub retailers_path: PathBuf,
    /// API key for the web-search collaborator. Required: discovery cannot
    /// run without it.
    pub search_api_key: String,
    /// Programmable search engine ID (the `cx` parameter).
    pub search_engine_id: String,
    /// API key for the generative query expander. Optional: when absent the
    /// expander always uses its deterministic templates.
    pub expander_api_key: Option<String>,
    pub expander_model: String,
    pub user_agent: String,
    pub search_timeout_secs: u64,
    pub page_timeout_secs: u64,
    pub robots_timeout_secs: u64,
    pub hydrate_concurrency: usize,
    pub dispatch_concurrency: usize,
    /// Minimum tiered-product count before the expansion loop stops.
    pub min_yield: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("retailers_path", &self.retailers_path)
            .field("search_api_key", &"[redacted]")
            .field("search_engine_id", &self.search_engine_id)
            .field(
                "expander_api_key",
                &self.expander_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("expander_model", &self.expander_model)
            .field("user_agent", &self.user_agent)
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("page_timeout_secs", &self.page_timeout_secs)
            .field("robots_timeout_secs", &self.robots_timeout_secs)
            .field("hydrate_concurrency", &self.hydrate_concurrency)
            .field("dispatch_concurrency", &self.dispatch_concurrency)
            .field("min_yield", &self.min_yield)
            .finish()
    }
}
