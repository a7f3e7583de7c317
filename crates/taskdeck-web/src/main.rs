use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use taskdeck_client::RestClient;
use taskdeck_store::BucketStore;
use taskdeck_web::pages::InnerAppState;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "taskdeck-web", about = "Task management web front-end")]
struct WebConfig {
    /// Address to bind
    #[arg(long, env = "TASKDECK_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(long, env = "TASKDECK_PORT", default_value = "3900")]
    port: u16,

    /// Base URL of the hosted backend project
    #[arg(long, env = "TASKDECK_BACKEND_URL")]
    backend_url: String,

    /// Service key for the backend
    #[arg(long, env = "TASKDECK_API_KEY")]
    api_key: String,

    /// Storage bucket holding task images
    #[arg(long, env = "TASKDECK_BUCKET", default_value = "task-images")]
    bucket: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = WebConfig::parse();
    info!("taskdeck-web starting");
    info!("backend: {}", config.backend_url);

    let records = RestClient::new(&config.backend_url, &config.api_key)
        .map_err(|e| anyhow::anyhow!("record client: {e}"))?;
    let files = BucketStore::new(&config.backend_url, &config.api_key, &config.bucket)
        .map_err(|e| anyhow::anyhow!("file store: {e}"))?;

    let state = Arc::new(InnerAppState::new(Arc::new(records), Arc::new(files)));

    let addr = SocketAddr::new(config.bind.parse()?, config.port);
    let listener = TcpListener::bind(addr).await?;
    info!("taskdeck-web listening on http://{addr}");

    taskdeck_web::serve(listener, state).await
}
