//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{NotificationBackend, SheetforgeConfig, StoreBackend};
use super::secret::secret_string;
use crate::domain::errors::SheetforgeError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix of environment variables that override file settings
pub const ENV_PREFIX: &str = "SHEETFORGE_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`SheetforgeConfig`]
/// 4. Applies environment variable overrides (`SHEETFORGE_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file is missing or unreadable, a
/// referenced variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use sheetforge::config::loader::load_config;
///
/// let config = load_config("sheetforge.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SheetforgeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SheetforgeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SheetforgeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
pub fn load_config_str(contents: &str) -> Result<SheetforgeConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: SheetforgeConfig = toml::from_str(&contents)
        .map_err(|e| SheetforgeError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        SheetforgeError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    tracing::debug!(
        exports = config.exports.len(),
        store = ?config.store.backend,
        notification = ?config.notification.backend,
        "Configuration loaded"
    );

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| SheetforgeError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SheetforgeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn env_bool(key: &str) -> Result<Option<bool>> {
    env(key)
        .map(|val| {
            val.parse::<bool>().map_err(|_| {
                SheetforgeError::Configuration(format!(
                    "{ENV_PREFIX}{key} must be true or false, got '{val}'"
                ))
            })
        })
        .transpose()
}

/// Applies environment variable overrides using the `SHEETFORGE_` prefix
///
/// Variables follow the pattern `SHEETFORGE_<SECTION>_<KEY>`, for example
/// `SHEETFORGE_EXPORT_OUTPUT_DIR` or `SHEETFORGE_STORE_BACKEND`.
fn apply_env_overrides(config: &mut SheetforgeConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env_bool("APPLICATION_DIAGNOSTIC_MODE")? {
        config.application.diagnostic_mode = val;
    }

    // Export overrides
    if let Some(val) = env("EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Some(val) = env("EXPORT_PUBLIC_BASE_URL") {
        config.export.public_base_url = val;
    }
    if let Some(val) = env("EXPORT_EXECUTION_MODE") {
        config.export.execution_mode = parse_enum(&val, "EXPORT_EXECUTION_MODE")?;
    }
    if let Some(val) = env_bool("EXPORT_SINGLE_FLIGHT")? {
        config.export.single_flight = val;
    }

    // Store overrides
    if let Some(val) = env("STORE_BACKEND") {
        config.store.backend = parse_enum::<StoreBackend>(&val, "STORE_BACKEND")?;
    }
    if let Some(val) = env("STORE_PATH") {
        config.store.path = Some(val);
    }

    // Notification overrides
    if let Some(val) = env("NOTIFICATION_BACKEND") {
        config.notification.backend =
            parse_enum::<NotificationBackend>(&val, "NOTIFICATION_BACKEND")?;
    }
    if let Some(val) = env("NOTIFICATION_WEBHOOK_URL") {
        config.notification.webhook_url = Some(val);
    }
    if let Some(val) = env("NOTIFICATION_WEBHOOK_TOKEN") {
        config.notification.webhook_token = Some(secret_string(val));
    }

    // Logging overrides
    if let Some(val) = env_bool("LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

/// Parse a lowercase enum value the way the TOML file spells it
fn parse_enum<T: serde::de::DeserializeOwned>(val: &str, key: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(val.trim().to_lowercase())).map_err(|_| {
        SheetforgeError::Configuration(format!("Invalid value '{val}' for {ENV_PREFIX}{key}"))
    })
}
