use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let search_api_key = require("SHOPSCOUT_SEARCH_API_KEY")?;
    let search_engine_id = require("SHOPSCOUT_SEARCH_ENGINE_ID")?;

    let env = parse_environment(&or_default("SHOPSCOUT_ENV", "development"))?;

    let bind_addr = parse_addr("SHOPSCOUT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHOPSCOUT_LOG_LEVEL", "info");
    let retailers_path = PathBuf::from(or_default(
        "SHOPSCOUT_RETAILERS_PATH",
        "./config/retailers.yaml",
    ));

    let expander_api_key = lookup("OPENAI_API_KEY").ok();
    let expander_model = or_default("SHOPSCOUT_EXPANDER_MODEL", "gpt-4o-mini");

    let user_agent = or_default("SHOPSCOUT_USER_AGENT", "shopscout/0.1 (product-discovery)");

    let search_timeout_secs = parse_u64("SHOPSCOUT_SEARCH_TIMEOUT_SECS", "10")?;
    let page_timeout_secs = parse_u64("SHOPSCOUT_PAGE_TIMEOUT_SECS", "8")?;
    let robots_timeout_secs = parse_u64("SHOPSCOUT_ROBOTS_TIMEOUT_SECS", "4")?;

    let hydrate_concurrency = parse_usize("SHOPSCOUT_HYDRATE_CONCURRENCY", "4")?;
    let dispatch_concurrency = parse_usize("SHOPSCOUT_DISPATCH_CONCURRENCY", "6")?;
    let min_yield = parse_usize("SHOPSCOUT_MIN_YIELD", "6")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        retailers_path,
        search_api_key,
        search_engine_id,
        expander_api_key,
        expander_model,
        user_agent,
        search_timeout_secs,
        page_timeout_secs,
        robots_timeout_secs,
        hydrate_concurrency,
        dispatch_concurrency,
        min_yield,
    })
}

fn parse_environment(raw: &str) -> Result<Environment, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "development" | "dev" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" | "prod" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPSCOUT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
