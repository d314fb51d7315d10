use std::path::PathBuf;

use crate::app_config::{AppConfig, Viewport};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
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
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional_path = |var: &str| -> Option<PathBuf> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
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

    let parse_nonzero_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = parse_u64(var, default)?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let selectors_path = PathBuf::from(or_default(
        "PRICEWATCH_SELECTORS_PATH",
        "./config/selectors.yaml",
    ));
    let output_path = PathBuf::from(or_default("PRICEWATCH_OUTPUT_PATH", "./product.txt"));
    let log_level = or_default("PRICEWATCH_LOG_LEVEL", "info");
    let headless = parse_bool("PRICEWATCH_HEADLESS", &or_default("PRICEWATCH_HEADLESS", "false"))?;
    let chromium_path = optional_path("PRICEWATCH_CHROMIUM_PATH");
    let viewport = parse_viewport(&or_default("PRICEWATCH_VIEWPORT", "1920x1080"))?;

    let navigation_timeout_secs = parse_nonzero_u64("PRICEWATCH_NAVIGATION_TIMEOUT_SECS", "60")?;
    let element_timeout_secs = parse_nonzero_u64("PRICEWATCH_ELEMENT_TIMEOUT_SECS", "30")?;
    let settle_timeout_ms = parse_u64("PRICEWATCH_SETTLE_TIMEOUT_MS", "5000")?;
    let poll_interval_ms = parse_nonzero_u64("PRICEWATCH_POLL_INTERVAL_MS", "100")?;
    let screenshot_dir = optional_path("PRICEWATCH_SCREENSHOT_DIR");

    Ok(AppConfig {
        selectors_path,
        output_path,
        log_level,
        headless,
        chromium_path,
        viewport,
        navigation_timeout_secs,
        element_timeout_secs,
        settle_timeout_ms,
        poll_interval_ms,
        screenshot_dir,
    })
}

/// Parse a boolean flag. Accepts `true/false`, `1/0` and `yes/no`, case-insensitively.
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

/// Parse a `WIDTHxHEIGHT` viewport such as `1920x1080`.
fn parse_viewport(raw: &str) -> Result<Viewport, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "PRICEWATCH_VIEWPORT".to_string(),
        reason,
    };

    let (width, height) = raw
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| invalid(format!("expected WIDTHxHEIGHT, got '{raw}'")))?;

    let width = width
        .trim()
        .parse::<u32>()
        .map_err(|e| invalid(format!("width: {e}")))?;
    let height = height
        .trim()
        .parse::<u32>()
        .map_err(|e| invalid(format!("height: {e}")))?;

    if width == 0 || height == 0 {
        return Err(invalid("dimensions must be greater than zero".to_string()));
    }

    Ok(Viewport { width, height })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
