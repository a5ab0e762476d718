use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hostel_booking::{router, AppConfig, AppContext, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hostel_booking=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    let store = Store::new(&config.data_file);
    store
        .init()
        .await
        .with_context(|| format!("initializing data file {}", config.data_file.display()))?;

    let app = router(AppContext::new(store));
    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("binding port {}", config.port))?;
    tracing::info!("Server running at http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
