use anyhow::Result;
use darwin::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut builder = ServerBuilder::new()
        .with_store(InMemoryRecordStore::new())
        .with_hooks(default_hooks());

    if let Some(capacity) = config.events.capacity {
        builder = builder.with_event_bus(capacity);
    }

    tracing::info!(
        service = darwin::server::exposure::rest::SERVICE_NAME,
        version = darwin::server::exposure::rest::API_VERSION,
        "starting"
    );

    builder.serve(&config.bind_addr()).await
}
