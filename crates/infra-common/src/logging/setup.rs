use crate::errors::{Error, Result};
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::fmt::format::FmtSpan;
use std::str::FromStr;

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// The log level to use
    pub level: Level,
    /// Whether to enable JSON formatting
    pub json: bool,
    /// Whether to include file and line information
    pub file_info: bool,
    /// Whether to log spans
    pub log_spans: bool,
    /// Whether output goes through the test writer (captured by `cargo test`)
    pub test_writer: bool,
    /// Application name to include in logs
    pub app_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: Level::INFO,
            json: false,
            file_info: false,
            log_spans: false,
            test_writer: false,
            app_name: "uactl".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new(level: Level, app_name: impl Into<String>) -> Self {
        LoggingConfig {
            level,
            app_name: app_name.into(),
            ..Default::default()
        }
    }

    /// Configuration suited to unit and integration tests: debug level,
    /// output captured per test.
    pub fn for_tests() -> Self {
        LoggingConfig {
            level: Level::DEBUG,
            test_writer: true,
            app_name: "uactl-test".to_string(),
            ..Default::default()
        }
    }

    /// Enable JSON formatting
    pub fn with_json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Enable file and line information in logs
    pub fn with_file_info(mut self) -> Self {
        self.file_info = true;
        self
    }

    /// Enable span logging
    pub fn with_spans(mut self) -> Self {
        self.log_spans = true;
        self
    }
}

/// Set up the logging system with the provided configuration.
///
/// Fails if a global subscriber is already installed.
pub fn setup_logging(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(config.level.into());

    let span_events = if config.log_spans {
        FmtSpan::ACTIVE
    } else {
        FmtSpan::NONE
    };

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(span_events)
        .with_file(config.file_info)
        .with_line_number(config.file_info);

    let installed = match (config.json, config.test_writer) {
        (true, true) => builder.json().with_test_writer().try_init(),
        (true, false) => builder.json().with_writer(std::io::stdout).try_init(),
        (false, true) => builder.with_test_writer().try_init(),
        (false, false) => builder.try_init(),
    };

    installed.map_err(|e| Error::Logging(e.to_string()))
}

/// Like [`setup_logging`], but an already-installed subscriber is not an
/// error. Returns `true` when this call installed the subscriber.
pub fn try_setup_logging(config: LoggingConfig) -> bool {
    setup_logging(config).is_ok()
}

/// Parse a log level from a string
pub fn parse_log_level(level: &str) -> Result<Level> {
    Level::from_str(level)
        .map_err(|_| Error::Config(format!("Invalid log level: {}", level)))
}

/// Log a welcome message with version info
pub fn log_welcome(app_name: &str, version: &str) {
    tracing::info!("Starting {} v{}", app_name, version);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("WARN").unwrap(), Level::WARN);
        assert!(matches!(parse_log_level("loud"), Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_flags() {
        let config = LoggingConfig::new(Level::TRACE, "registry")
            .with_json()
            .with_file_info()
            .with_spans();
        assert!(config.json && config.file_info && config.log_spans);
        assert_eq!(config.app_name, "registry");
        assert!(!config.test_writer);
    }

    #[test]
    fn test_second_install_is_reported() {
        // Whichever test installs first wins; afterwards installs must fail cleanly.
        let _ = try_setup_logging(LoggingConfig::for_tests());
        assert!(!try_setup_logging(LoggingConfig::for_tests()));
        log_welcome("uactl-test", env!("CARGO_PKG_VERSION"));
    }
}
