//! Logger Module
//!
//! A logging system based on `tracing-subscriber` with support for:
//! - Console output with color control
//! - File output in full, compact or JSON format
//! - Changing the level filter at runtime

pub mod config;
pub mod error;
pub(crate) mod writer;

#[cfg(test)]
pub(crate) mod capture;

pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;
use std::sync::Arc;

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::Layered, layer::SubscriberExt, reload,
    util::SubscriberInitExt,
};
use writer::LogFileWriter;

type FilteredRegistry = Layered<reload::Layer<EnvFilter, Registry>, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Handle for changing the active level filter after initialisation.
#[derive(Clone)]
pub struct LogLevelHandle {
    pub(crate) inner: Arc<reload::Handle<EnvFilter, Registry>>,
}

impl LogLevelHandle {
    /// Replace the active filter with `level`.
    pub fn set_level(&self, level: &str) -> Result<(), LoggerError> {
        parse_level(level)?;
        let filter = EnvFilter::try_new(level).map_err(|e| LoggerError::config(e.to_string()))?;
        self.inner
            .reload(filter)
            .map_err(|e| LoggerError::reload(e.to_string()))
    }

    /// The filter currently in effect, rendered as a directive string.
    pub fn current_level(&self) -> Option<String> {
        self.inner.with_current(|filter| filter.to_string()).ok()
    }
}

/// Initialize the global subscriber with the given configuration
pub fn init_logger(config: LoggerConfig) -> Result<LogLevelHandle, LoggerError> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(filter);

    // File layer goes first so console ANSI settings cannot leak into it.
    // See: https://github.com/tokio-rs/tracing/issues/1817
    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.file.enabled {
        layers.push(file_layer(&config.file)?);
    }
    if config.console.enabled {
        layers.push(console_layer(&config.console));
    }

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(layers)
        .try_init()
        .map_err(|e| LoggerError::config(e.to_string()))?;

    Ok(LogLevelHandle {
        inner: Arc::new(handle),
    })
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let use_ansi = config.colored && std::io::stdout().is_terminal();
    fmt::layer()
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(config: &FileConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = LogFileWriter::new(config)?;
    let layer = match config.format {
        LogFormat::Full => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_ansi(false)
            .json()
            .with_writer(writer)
            .boxed(),
    };
    Ok(layer)
}
