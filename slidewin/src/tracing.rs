use once_cell::sync::Lazy;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::Result;

/// Subscriber for tests; logs go to stdout only when `TEST_LOG` is set.
pub static TEST_TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info";
    let subscriber_name = "test";
    let outcome = if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber(subscriber_name, default_filter_level, std::io::stdout))
    } else {
        init_subscriber(get_subscriber(subscriber_name, default_filter_level, std::io::sink))
    };

    if let Err(err) = outcome {
        eprintln!("test tracing not installed: {err}");
    }
});

/// Composes a bunyan-formatted subscriber. `RUST_LOG` directives take precedence over
/// `env_filter`.
pub fn get_subscriber<S0, S1, W>(name: S0, env_filter: S1, sink: W) -> impl Subscriber + Send + Sync
where
    S0: Into<String>,
    S1: AsRef<str>,
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name.into(), sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Installs the subscriber as the global default; fails if one is already set.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<()> {
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
