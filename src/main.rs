use std::sync::Arc;

use afl_tipping_fixtures::config::EngineConfig;
use afl_tipping_fixtures::handler::handler;
use afl_tipping_fixtures::resolver::FixtureResolver;
use lambda_runtime::{service_fn, Error};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize structured logging with tracing
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init();

    // Config and the cache live for the whole process; warm invocations reuse them
    let config = EngineConfig::from_env()?;
    info!(override_path = %config.override_path.display(), api_url = %config.api_url, "Loaded engine config");
    let resolver = Arc::new(FixtureResolver::from_config(&config));

    lambda_runtime::run(service_fn(move |event| {
        let resolver = Arc::clone(&resolver);
        async move { handler(resolver, event).await }
    }))
    .await
}
