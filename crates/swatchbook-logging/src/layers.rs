// ABOUTME: Layer constructors for the different logging output formats
// ABOUTME: Provides console, file, and JSON layers plus the shared environment filter

use anyhow::{Context, Result};
use std::fs;
use tracing::Subscriber;
use tracing_appender::non_blocking;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    registry::LookupSpan,
};

use crate::config::{FileConfig, LoggingConfig, OutputConfig};

/// Boxed layer usable on top of any span-aware subscriber
pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Create a console output layer. Console output goes to stderr.
pub fn create_console_layer<S>(config: &OutputConfig) -> Option<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if !config.console || config.json {
        return None;
    }

    let layer = if config.pretty_console {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .with_span_events(FmtSpan::CLOSE)
            .pretty()
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .boxed()
    };

    Some(layer)
}

/// Create a file output layer with daily rotation.
pub fn create_file_layer<S>(config: &FileConfig) -> Result<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if let Some(parent) = config.path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create log directory: {}", parent.display())
        })?;
    }

    let file_name = config
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Invalid log file path")?;

    let directory = config
        .path
        .parent()
        .context("Log file path has no parent directory")?;

    // Daily rotation; max_files of 0 keeps every rotated file
    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(file_name);
    if config.max_files > 0 {
        builder = builder.max_log_files(config.max_files);
    }
    let file_appender = builder
        .build(directory)
        .with_context(|| format!("Failed to open log file in {}", directory.display()))?;
    let (non_blocking_writer, guard) = non_blocking(file_appender);

    // The writer must outlive every log call; the process owns it until exit.
    std::mem::forget(guard);

    let layer = fmt::layer()
        .with_writer(non_blocking_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .boxed();

    Ok(layer)
}

/// Create a JSON output layer for structured logging on stderr.
pub fn create_json_layer<S>(config: &OutputConfig) -> Option<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if !config.json {
        return None;
    }

    let layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .boxed();

    Some(layer)
}

/// Create an environment filter from the logging configuration.
///
/// `RUST_LOG` replaces the configured directives entirely when set.
pub fn create_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        return EnvFilter::try_new(env_filter).context("Invalid RUST_LOG directives");
    }

    let mut filter = EnvFilter::new(config.level.0.to_string());
    for (module, level) in &config.module_levels {
        filter = filter.add_directive(
            format!("{}={}", module, level.0)
                .parse()
                .with_context(|| format!("Invalid filter directive for module '{module}'"))?,
        );
    }

    Ok(filter)
}
