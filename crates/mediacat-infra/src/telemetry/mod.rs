//! Tracing initialization
//!
//! Logs go through `tracing-subscriber`, filtered by `RUST_LOG` when set. The server
//! logs to stdout; command-line tools log to stderr so their output stays pipeable.

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for the HTTP server
pub const SERVER_DEFAULT_FILTER: &str = "mediacat=debug,tower_http=debug";

/// Default filter for command-line tools
pub const CLI_DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct TelemetryOptions {
    pub service_name: String,
    pub environment: String,
    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
    pub json: bool,
    pub to_stderr: bool,
}

impl TelemetryOptions {
    pub fn server(service_name: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            environment: environment.into(),
            default_filter: SERVER_DEFAULT_FILTER.to_string(),
            json: false,
            to_stderr: false,
        }
    }

    pub fn cli(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            environment: "cli".to_string(),
            default_filter: CLI_DEFAULT_FILTER.to_string(),
            json: false,
            to_stderr: true,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| self.default_filter.as_str().into())
    }

    fn writer(&self) -> BoxMakeWriter {
        if self.to_stderr {
            BoxMakeWriter::new(std::io::stderr)
        } else {
            BoxMakeWriter::new(std::io::stdout)
        }
    }
}

/// Initialize tracing
pub fn init_telemetry(options: &TelemetryOptions) -> Result<(), Box<dyn std::error::Error>> {
    let registry = tracing_subscriber::registry().with(options.env_filter());

    if options.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(options.writer()),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(options.writer()))
            .try_init()?;
    }

    tracing::debug!(
        service = %options.service_name,
        environment = %options.environment,
        "Tracing initialized"
    );
    Ok(())
}

pub async fn shutdown_telemetry() {
    tracing::debug!("Telemetry shutdown");
}
