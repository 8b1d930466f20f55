//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PiiGuardConfig;
use super::secret_string;
use crate::domain::errors::PiiError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PiiGuardConfig
/// 4. Applies environment variable overrides (PIIGUARD_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use piiguard::config::loader::load_config;
///
/// let config = load_config("piiguard.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PiiGuardConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PiiError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PiiError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration from `path` if the file exists, defaults otherwise
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<PiiGuardConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    finish(PiiGuardConfig::default())
}

/// Parses configuration from TOML text
pub fn parse_config(contents: &str) -> Result<PiiGuardConfig> {
    let contents = substitute_env_vars(contents)?;

    let config: PiiGuardConfig = toml::from_str(&contents)
        .map_err(|e| PiiError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

fn finish(mut config: PiiGuardConfig) -> Result<PiiGuardConfig> {
    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        PiiError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PiiError::Configuration(e.to_string()))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Comment lines are copied verbatim
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PiiError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using PIIGUARD_* prefix
///
/// Environment variables follow the pattern: PIIGUARD_<SECTION>_<KEY>
/// For example: PIIGUARD_ANONYMIZATION_DEFAULT_STRATEGY
fn apply_env_overrides(config: &mut PiiGuardConfig) {
    // Detection overrides
    if let Ok(val) = std::env::var("PIIGUARD_DETECTION_CONFIDENCE_THRESHOLD") {
        if let Ok(threshold) = val.parse() {
            config.detection.confidence_threshold = threshold;
        }
    }
    if let Ok(val) = std::env::var("PIIGUARD_DETECTION_CONTEXT_WINDOW") {
        if let Ok(window) = val.parse() {
            config.detection.context_window = window;
        }
    }
    if let Ok(val) = std::env::var("PIIGUARD_DETECTION_PATTERN_LIBRARY") {
        config.detection.pattern_library = Some(val.into());
    }

    // Anonymization overrides
    if let Ok(val) = std::env::var("PIIGUARD_ANONYMIZATION_DEFAULT_STRATEGY") {
        config.anonymization.default_strategy = val;
    }
    if let Ok(val) = std::env::var("PIIGUARD_ANONYMIZATION_MASK_CHARACTER") {
        if let Some(c) = val.chars().next() {
            config.anonymization.mask_character = c;
        }
    }
    if let Ok(val) = std::env::var("PIIGUARD_ANONYMIZATION_PRESERVE_LENGTH") {
        config.anonymization.preserve_length = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("PIIGUARD_ANONYMIZATION_PRESERVE_FORMAT") {
        config.anonymization.preserve_format = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("PIIGUARD_ANONYMIZATION_HASH_SALT") {
        config.anonymization.hash_salt = secret_string(val);
    }

    // Performance overrides
    if let Ok(val) = std::env::var("PIIGUARD_PERFORMANCE_MAX_TEXT_LENGTH") {
        if let Ok(max) = val.parse() {
            config.performance.max_text_length = max;
        }
    }
    if let Ok(val) = std::env::var("PIIGUARD_PERFORMANCE_MAX_PARALLEL") {
        if let Ok(parallel) = val.parse() {
            config.performance.max_parallel = parallel;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("PIIGUARD_LOGGING_LEVEL") {
        config.logging.level = val;
    }
    if let Ok(val) = std::env::var("PIIGUARD_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("PIIGUARD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
