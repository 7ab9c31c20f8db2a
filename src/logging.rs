//! Log subscriber setup. Logs go to stderr; stdout carries the report.

use std::io::IsTerminal;
use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
pub enum LoggingError {
  #[error("invalid log format: {0} (expected: text|json)")]
  InvalidFormat(String),
  #[error("invalid log level: {0}")]
  InvalidLevel(String),
  #[error("failed to initialize logger: {0}")]
  InitializationFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Text,
  Json,
}

impl FromStr for LogFormat {
  type Err = LoggingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "text" => Ok(LogFormat::Text),
      "json" => Ok(LogFormat::Json),
      _ => Err(LoggingError::InvalidFormat(s.to_string())),
    }
  }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
  pub format: LogFormat,
  /// An `EnvFilter` directive, e.g. `info` or `biomap_batch=debug`.
  pub level: String,
  pub with_targets: bool,
}

impl LogConfig {
  pub fn new(format: LogFormat, level: impl Into<String>) -> Self {
    Self {
      format,
      level: level.into(),
      with_targets: true,
    }
  }
}

/// Install the global subscriber.
pub fn init(cfg: &LogConfig) -> Result<(), LoggingError> {
  let filter =
    EnvFilter::try_new(&cfg.level).map_err(|_| LoggingError::InvalidLevel(cfg.level.clone()))?;
  let registry = tracing_subscriber::registry().with(filter);

  let result = match cfg.format {
    LogFormat::Text => registry
      .with(
        fmt::layer()
          .with_writer(std::io::stderr)
          .with_ansi(std::io::stderr().is_terminal())
          .with_target(cfg.with_targets),
      )
      .try_init(),
    LogFormat::Json => registry
      .with(
        fmt::layer()
          .json()
          .with_writer(std::io::stderr)
          .with_ansi(false)
          .with_target(cfg.with_targets),
      )
      .try_init(),
  };

  result.map_err(|e| LoggingError::InitializationFailed(e.to_string()))
}
