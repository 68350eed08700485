//! Tracing subscriber setup
//!
//! Log output goes to stderr. Stdout belongs to the terminal host's report
//! stream.

use crate::config::{LoggingConfig, WidgetConfig};
use crate::error::{RuntimeError, RuntimeResult};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

const DEV_FILTER: &str = "bmi_widget_runtime=debug,bmi_widget_shared=debug";
const PROD_FILTER: &str = "bmi_widget_runtime=info,bmi_widget_shared=info";

/// Pick the filter directives: `RUST_LOG` wins, then config, then the
/// environment default.
fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match &logging.filter {
        Some(directives) => directives.as_str().into(),
        None if WidgetConfig::is_production() => PROD_FILTER.into(),
        None => DEV_FILTER.into(),
    })
}

/// Build the subscriber, writing formatted events to `writer`
///
/// JSON output is used when configured or when running in production.
fn build_subscriber<W>(logging: &LoggingConfig, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(env_filter(logging));

    if logging.json || WidgetConfig::is_production() {
        Box::new(registry.with(tracing_subscriber::fmt::layer().json().with_writer(writer)))
    } else {
        Box::new(registry.with(tracing_subscriber::fmt::layer().pretty().with_writer(writer)))
    }
}

/// Initialize tracing/logging on stderr
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(logging: &LoggingConfig) -> RuntimeResult<()> {
    tracing::subscriber::set_global_default(build_subscriber(logging, std::io::stderr))
        .map_err(|e| RuntimeError::Logging(e.to_string()))
}
