use eyre::Result;
use tracing_subscriber::EnvFilter;

use portage_server::config;
use portage_server::state::AppState;
use portage_storage::FileStore;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = config::load()?;

    let store = FileStore::new(&config.data_file);
    store.ensure_initialized().await?;

    let app = portage_server::app(AppState::new(store), &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        data_file = %config.data_file.display(),
        "server listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
