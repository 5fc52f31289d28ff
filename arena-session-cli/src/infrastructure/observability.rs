use crate::infrastructure::error::{CliError, Result};
use std::sync::Mutex;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose logs follow `default_level` unless `RUST_LOG` says otherwise
const WORKSPACE_TARGETS: [&str; 3] = [
    "arena_session_cli",
    "arena_session_core",
    "arena_session_sync",
];

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub default_level: tracing::Level,
    pub json_format: bool,
    pub file_output: Option<String>,
    pub show_spans: bool,
    pub show_thread_ids: bool,
    pub show_targets: bool,
    pub show_logs: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: tracing::Level::INFO,
            json_format: false,
            file_output: None,
            show_spans: false,
            show_thread_ids: false,
            show_targets: true,
            show_logs: true,
        }
    }
}

impl LogConfig {
    /// Development configuration (verbose, human-readable)
    pub fn dev() -> Self {
        Self {
            default_level: tracing::Level::DEBUG,
            show_spans: true,
            show_thread_ids: true,
            ..Default::default()
        }
    }

    /// Machine-readable output, one JSON object per line
    pub fn json() -> Self {
        Self {
            json_format: true,
            ..Default::default()
        }
    }

    pub fn without_logs(mut self) -> Self {
        self.show_logs = false;
        self
    }

    pub fn with_file_output(mut self, path: String) -> Self {
        self.file_output = Some(path);
        self
    }

    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.default_level = level;
        self
    }

    /// Filter directives used when `RUST_LOG` is unset
    pub fn default_directives(&self) -> String {
        WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, self.default_level))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn init(self) -> Result<()> {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(self.default_directives())
                .map_err(|e| CliError::LogInit(e.to_string()))?,
        };

        if !self.show_logs {
            // Silent mode: no fmt layer, just filter
            return tracing_subscriber::registry()
                .with(env_filter)
                .try_init()
                .map_err(|e| CliError::LogInit(e.to_string()));
        }

        let writer = match &self.file_output {
            Some(path) => {
                let file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)?;
                BoxMakeWriter::new(Mutex::new(file))
            }
            None => BoxMakeWriter::new(std::io::stderr),
        };

        let span_events = if self.show_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let (json_layer, text_layer) = if self.json_format {
            let layer = fmt::layer()
                .json()
                .with_target(self.show_targets)
                .with_thread_ids(self.show_thread_ids)
                .with_span_events(span_events)
                .with_writer(writer);
            (Some(layer), None)
        } else {
            let layer = fmt::layer()
                .with_target(self.show_targets)
                .with_thread_ids(self.show_thread_ids)
                .with_span_events(span_events)
                .with_ansi(self.file_output.is_none())
                .with_writer(writer);
            (None, Some(layer))
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .with(text_layer)
            .try_init()
            .map_err(|e| CliError::LogInit(e.to_string()))
    }
}
