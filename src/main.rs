use std::net::SocketAddr;
use std::time::Duration;

use study_quiz_backend::{
    build_router,
    config::{get_config, init_config},
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    init_config()?;
    let config = get_config();

    let app_state = AppState::new()?;

    {
        let state = app_state.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(60)).await;
                let evicted = state.sessions.evict_expired();
                let windows = state.limiter.prune();
                if evicted > 0 {
                    info!(evicted, remaining = state.sessions.len(), "Evicted idle sessions");
                }
                tracing::debug!(windows, "Pruned rate limit windows");
            }
        });
    }

    let app = build_router(app_state);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
