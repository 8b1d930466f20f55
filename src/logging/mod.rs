//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels with `RUST_LOG` override
//! - Console output on stderr
//! - JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use piiguard::logging::init_logging;
//! use piiguard::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the outcome of processing one input
///
/// # Example
///
/// ```no_run
/// use piiguard::log_processing_complete;
///
/// log_processing_complete!("notes.txt", 3, 0);
/// ```
#[macro_export]
macro_rules! log_processing_complete {
    ($source:expr, $matches:expr, $dropped:expr) => {
        tracing::info!(
            source = %$source,
            matches = $matches,
            dropped = $dropped,
            "Processing completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use piiguard::log_error_with_context;
/// use piiguard::domain::PiiError;
///
/// let error = PiiError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}
