//! Tracing and logging setup
//!
//! One global subscriber per process: pretty output while developing, JSON
//! lines in production, filtered by `RUST_LOG` or the configured level.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{AppSettings, LogFormat};

/// Dependencies whose own logging is capped below the service level
const QUIET_TARGETS: &[&str] = &["sqlx=warn"];

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level filter used when `RUST_LOG` is not set
    pub level: Level,
    /// Enable JSON output format
    pub json: bool,
    /// Include span events (new, close)
    pub span_events: bool,
    /// Include file and line numbers
    pub file_line: bool,
    /// Include thread names
    pub thread_names: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            span_events: false,
            file_line: true,
            thread_names: false,
        }
    }
}

impl TracingConfig {
    /// Create a development configuration with debug logging
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            json: false,
            span_events: true,
            file_line: true,
            thread_names: true,
        }
    }

    /// Create a production configuration with JSON logging
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            json: true,
            span_events: false,
            file_line: false,
            thread_names: false,
        }
    }

    /// Pick a preset from the application settings, honoring the requested log format
    #[must_use]
    pub fn from_settings(settings: &AppSettings) -> Self {
        let base = if settings.env.is_development() {
            Self::development()
        } else {
            Self::production()
        };

        Self {
            json: settings.log_format == LogFormat::Json,
            ..base
        }
    }

    /// Filter used when `RUST_LOG` is not set
    ///
    /// Warm-up issues one bulk query per entity; sqlx would otherwise log
    /// each of them at `info`.
    pub fn directives(&self) -> String {
        let mut directives = self.level.to_string().to_lowercase();
        for target in QUIET_TARGETS {
            directives.push(',');
            directives.push_str(target);
        }
        directives
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `config`. Fails if a subscriber is
/// already installed.
pub fn try_init_tracing_with_config(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directives()));

    // Exactly one of the two layers is active; `Option<Layer>` is a no-op when `None`.
    let json_layer = config.json.then(|| {
        fmt::layer()
            .json()
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_thread_names(config.thread_names)
            .with_span_events(config.span_events())
    });

    let pretty_layer = (!config.json).then(|| {
        fmt::layer()
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_thread_names(config.thread_names)
            .with_span_events(config.span_events())
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    #[test]
    fn test_default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.json);
        assert!(!config.span_events);
        assert!(config.file_line);
    }

    #[test]
    fn test_production_config() {
        let config = TracingConfig::production();
        assert_eq!(config.level, Level::INFO);
        assert!(config.json);
        assert!(!config.file_line);
    }

    #[test]
    fn test_from_settings_respects_log_format() {
        let settings = AppSettings {
            name: "isupipe".to_string(),
            env: Environment::Development,
            log_format: LogFormat::Json,
        };
        let config = TracingConfig::from_settings(&settings);
        assert_eq!(config.level, Level::DEBUG);
        assert!(config.json);

        let settings = AppSettings {
            env: Environment::Production,
            log_format: LogFormat::Pretty,
            ..settings
        };
        let config = TracingConfig::from_settings(&settings);
        assert_eq!(config.level, Level::INFO);
        assert!(!config.json);
    }

    #[test]
    fn test_directives_quiet_sqlx() {
        assert_eq!(TracingConfig::default().directives(), "info,sqlx=warn");
        assert_eq!(TracingConfig::development().directives(), "debug,sqlx=warn");
    }

    #[test]
    fn test_second_install_fails() {
        // Whichever call runs first in this process may win; a repeat never succeeds
        let _ = try_init_tracing_with_config(TracingConfig::default());
        assert!(matches!(
            try_init_tracing_with_config(TracingConfig::default()),
            Err(TracingError::AlreadyInitialized)
        ));
    }
}
