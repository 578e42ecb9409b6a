//! Subscriber setup driven by [`LoggingConfig`].
//!
//! ```rust,ignore
//! use tessera_runtime::config::ConfigLoader;
//! use tessera_runtime::logging;
//!
//! let config = ConfigLoader::new().load()?;
//! logging::init_from_config(&config.logging);
//! ```
//!
//! `RUST_LOG` replaces the configured base level; per-module `filters`
//! are still applied on top of it.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::warn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LogOutput, LoggingConfig, SpanEventConfig};

const DEFAULT_LOG_FILE: &str = "tessera.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber described by `config`.
///
/// Does nothing if a subscriber is already installed.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = LoggingBuilder::from_config(config).try_init();
}

/// Subscriber settings resolved from a [`LoggingConfig`].
#[derive(Debug, Clone)]
pub struct LoggingBuilder {
    directives: Vec<String>,
    format: LogFormat,
    output: LogOutput,
    file_path: Option<PathBuf>,
    span_events: FmtSpan,
    thread_ids: bool,
    file_location: bool,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::from_config(&LoggingConfig::default())
    }
}

impl LoggingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        let mut directives = vec![config.level.as_str().to_string()];
        directives.extend(
            config
                .filters
                .iter()
                .map(|(target, level)| format!("{target}={level}")),
        );
        Self {
            directives,
            format: config.format,
            output: config.output,
            file_path: config.file_path.clone(),
            span_events: span_events(&config.span_events),
            thread_ids: config.thread_ids,
            file_location: config.file_location,
        }
    }

    /// Adds a filter directive such as `tessera_core=debug`.
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sends output to `path`, creating it if needed.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = LogOutput::File;
        self.file_path = Some(path.into());
        self
    }

    /// Where lines end up. File output without a path goes to stdout.
    pub fn effective_output(&self) -> LogOutput {
        match (self.output, &self.file_path) {
            (LogOutput::File, None) => LogOutput::Stdout,
            (output, _) => output,
        }
    }

    pub fn init(self) {
        let _ = self.try_init();
    }

    pub fn try_init(self) -> Result<(), TryInitError> {
        if self.output == LogOutput::File && self.file_path.is_none() {
            warn!("log output is `file` but no file_path is set; using stdout");
        }
        let filter = self.filter();
        tracing_subscriber::registry()
            .with(self.layer())
            .with(filter)
            .try_init()
    }

    fn filter(&self) -> EnvFilter {
        let (base, extra) = match self.directives.split_first() {
            Some((base, extra)) => (base.as_str(), extra),
            None => ("info", &[][..]),
        };
        let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(base));
        for directive in extra {
            match directive.parse() {
                Ok(parsed) => filter = filter.add_directive(parsed),
                Err(e) => warn!(%directive, error = %e, "ignoring invalid log directive"),
            }
        }
        filter
    }

    fn writer(&self) -> BoxMakeWriter {
        match (self.effective_output(), &self.file_path) {
            (LogOutput::Stderr, _) => BoxMakeWriter::new(std::io::stderr),
            (LogOutput::File, Some(path)) => {
                let dir = path
                    .parent()
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                let name = path
                    .file_name()
                    .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE));
                BoxMakeWriter::new(tracing_appender::rolling::never(dir, name))
            }
            _ => BoxMakeWriter::new(std::io::stdout),
        }
    }

    fn layer(&self) -> BoxedLayer {
        let layer = fmt::layer()
            .with_writer(self.writer())
            .with_span_events(self.span_events.clone())
            .with_thread_ids(self.thread_ids)
            .with_file(self.file_location)
            .with_line_number(self.file_location);
        match self.format {
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Full => layer.boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
            #[cfg(feature = "json-log")]
            LogFormat::Json => layer.json().boxed(),
        }
    }
}

fn span_events(config: &SpanEventConfig) -> FmtSpan {
    [
        (config.new, FmtSpan::NEW),
        (config.enter, FmtSpan::ENTER),
        (config.exit, FmtSpan::EXIT),
        (config.close, FmtSpan::CLOSE),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .fold(FmtSpan::NONE, |events, (_, flag)| events | flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_from_config() {
        let mut config = LoggingConfig {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            output: LogOutput::Stderr,
            thread_ids: true,
            file_location: true,
            span_events: SpanEventConfig {
                new: true,
                close: true,
                ..Default::default()
            },
            ..Default::default()
        };
        config
            .filters
            .insert("tessera_core".to_string(), LogLevel::Trace);
        config
            .filters
            .insert("tessera_framework".to_string(), LogLevel::Warn);

        let builder = LoggingBuilder::from_config(&config);
        assert_eq!(
            builder.directives,
            ["debug", "tessera_core=trace", "tessera_framework=warn"]
        );
        assert_eq!(builder.format, LogFormat::Pretty);
        assert_eq!(builder.effective_output(), LogOutput::Stderr);
        assert_eq!(builder.span_events, FmtSpan::NEW | FmtSpan::CLOSE);
        assert!(builder.thread_ids);
        assert!(builder.file_location);
    }

    #[test]
    fn test_default_builder() {
        let builder = LoggingBuilder::new().directive("tessera_framework=warn");
        assert_eq!(builder.directives, ["info", "tessera_framework=warn"]);
        assert_eq!(builder.format, LogFormat::Compact);
        assert_eq!(builder.effective_output(), LogOutput::Stdout);
        assert_eq!(builder.span_events, FmtSpan::NONE);
        assert!(!builder.thread_ids);
    }

    #[test]
    fn test_file_output() {
        let config = LoggingConfig {
            output: LogOutput::File,
            ..Default::default()
        };
        let builder = LoggingBuilder::from_config(&config);
        assert_eq!(builder.effective_output(), LogOutput::Stdout);

        let builder = builder.file("logs/tessera.log");
        assert_eq!(builder.effective_output(), LogOutput::File);
        assert_eq!(builder.file_path.as_deref(), Some(Path::new("logs/tessera.log")));
    }

    #[test]
    fn test_span_events_from_config() {
        let all = SpanEventConfig {
            new: true,
            enter: true,
            exit: true,
            close: true,
        };
        assert_eq!(span_events(&all), FmtSpan::FULL);
        assert_eq!(span_events(&SpanEventConfig::default()), FmtSpan::NONE);
    }
}
