//! Logging setup for the binary.
//!
//! The library only emits `tracing` events; this installs the subscriber. Logs go to
//! stderr so rendered frames on stdout stay clean. `FOLIO_LOG` takes an `EnvFilter`
//! directive and overrides the verbosity flags.
//!
//! - default: `warn` (degraded catalog loads)
//! - `-v`: `debug` (ignored events, timer scheduling, facet results)
//! - `-vv`: `trace`

use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub const LOG_ENV: &str = "FOLIO_LOG";

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub with_ansi: bool,
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_ansi: true,
            with_target: false,
        }
    }
}

impl LogConfig {
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

pub fn init_logging(config: &LogConfig) {
    init_logging_with_writer(config, std::io::stderr);
}

/// Installs the subscriber with a custom writer. A second call is a no-op.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        // Dependencies stay at warn.
        EnvFilter::new(format!(
            "warn,folio={level}",
            level = level.as_str().to_lowercase()
        ))
    })
}
