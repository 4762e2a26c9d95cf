//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output on stderr
//! - JSON-formatted local file logs with rotation
//! - Configurable log levels (`RUST_LOG` overrides)
//!
//! Entity text is never logged; events carry types, offsets and counts.
//!
//! # Example
//!
//! ```no_run
//! use lexanon::logging::init_logging;
//! use lexanon::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the completion of a detection pass
///
/// # Example
///
/// ```no_run
/// use lexanon::log_detection_complete;
/// use std::time::Duration;
///
/// log_detection_complete!("enhanced", 12, Duration::from_millis(8));
/// ```
#[macro_export]
macro_rules! log_detection_complete {
    ($mode:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            mode = %$mode,
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Detection completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use lexanon::log_error_with_context;
/// use lexanon::domain::LexanonError;
///
/// let error = LexanonError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
