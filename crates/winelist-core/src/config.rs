use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset; `.env` templates often ship `KEY=`.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("WINELIST_ENV", "development"))?;
    let log_level = or_default("WINELIST_LOG_LEVEL", "info");

    let sheet_url = optional("WINELIST_SHEET_URL");
    let sheet_id = optional("WINELIST_SHEET_ID");
    let sheet_gid = parse_u64("WINELIST_SHEET_GID", "0")?;

    let fetch_timeout_secs = parse_u64("WINELIST_FETCH_TIMEOUT_SECS", "30")?;
    if fetch_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "WINELIST_FETCH_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let fetch_user_agent = or_default("WINELIST_FETCH_USER_AGENT", "winelist/0.1 (menu-sync)");
    let fetch_max_retries = parse_u32("WINELIST_FETCH_MAX_RETRIES", "0")?;
    let fetch_retry_backoff_base_secs = parse_u64("WINELIST_FETCH_RETRY_BACKOFF_BASE_SECS", "2")?;

    let fallback_category = or_default("WINELIST_FALLBACK_CATEGORY", "uncategorized")
        .trim()
        .to_string();
    if fallback_category.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "WINELIST_FALLBACK_CATEGORY".to_string(),
            reason: "must not be blank".to_string(),
        });
    }

    let header_aliases_path = optional("WINELIST_HEADER_ALIASES_PATH").map(PathBuf::from);

    Ok(AppConfig {
        env,
        log_level,
        sheet_url,
        sheet_id,
        sheet_gid,
        fetch_timeout_secs,
        fetch_user_agent,
        fetch_max_retries,
        fetch_retry_backoff_base_secs,
        fallback_category,
        header_aliases_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WINELIST_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
