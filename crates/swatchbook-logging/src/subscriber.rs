// ABOUTME: Tracing subscriber initialization and layer composition
// ABOUTME: Combines console, file, and JSON layers behind a single environment filter

use anyhow::{Context, Result};
use tracing_subscriber::{prelude::*, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::layers::{create_console_layer, create_env_filter, create_file_layer, create_json_layer};

/// Initialize the global tracing subscriber with the given configuration.
pub fn init_subscriber(config: LoggingConfig) -> Result<()> {
    let env_filter = create_env_filter(&config).context("Failed to create environment filter")?;

    let mut layers = Vec::new();
    if let Some(console) = create_console_layer(&config.output) {
        layers.push(console);
    }
    if let Some(json) = create_json_layer(&config.output) {
        layers.push(json);
    }
    if config.output.file {
        layers.push(create_file_layer(&config.file).context("Failed to set up file logging")?);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .context("Global tracing subscriber already installed")?;

    tracing::debug!(
        log_level = %config.level.0,
        console_output = config.output.console,
        file_output = config.output.file,
        json_output = config.output.json,
        file_path = %config.file.path.display(),
        "Swatchbook logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileConfig, LogLevel, OutputConfig};
    use std::collections::HashMap;
    use std::sync::Once;
    use tempfile::tempdir;
    use tracing::Level;

    static INIT: Once = Once::new();

    #[test]
    fn test_init_subscriber_installs_once() {
        INIT.call_once(|| {
            // The first call may lose to another test; the second always finds a subscriber
            let _ = init_subscriber(LoggingConfig::default());
            let err = init_subscriber(LoggingConfig::default()).unwrap_err();
            assert!(err.to_string().contains("already installed"));
        });
    }

    #[test]
    fn test_custom_config_builds_filter() {
        let temp_dir = tempdir().unwrap();

        let config = LoggingConfig {
            level: LogLevel(Level::DEBUG),
            module_levels: HashMap::new(),
            output: OutputConfig {
                console: true,
                file: false,
                json: false,
                pretty_console: true,
            },
            file: FileConfig {
                path: temp_dir.path().join("test.log"),
                max_files: 3,
            },
        };

        // Installing a global subscriber here would race with other tests
        assert!(create_env_filter(&config).is_ok());
    }
}
