// ABOUTME: Public API for swatchbook logging infrastructure using tokio-tracing
// ABOUTME: Provides centralized configuration and initialization for structured logging

pub mod config;
pub mod layers;
pub mod performance;
pub mod subscriber;


// Re-export tracing macros for convenience
pub use tracing::{Level, Span, debug, error, info, instrument, span, trace, warn};

pub use config::{FileConfig, LogLevel, LoggingConfig, OutputConfig};
pub use performance::PerfTimer;
pub use subscriber::init_subscriber;

use anyhow::Result;

/// Initialize logging with default configuration plus environment overrides.
pub fn init_logging() -> Result<()> {
    init_subscriber(LoggingConfig::from_env()?)
}

/// Initialize logging with custom configuration.
pub fn init_logging_with_config(config: LoggingConfig) -> Result<()> {
    init_subscriber(config)
}
