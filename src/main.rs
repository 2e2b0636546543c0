use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sitedesk::config::Config;
use sitedesk::router::{SiteState, site_router};
use sitedesk::service::accounts;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        static_dir = %cfg.static_dir.display(),
        loglevel = %cfg.loglevel,
        session_ttl_hours = cfg.session_ttl_hours,
        insecure_cookie = cfg.insecure_cookie
    );

    let storage = sitedesk::db::open(&cfg.database_url).await?;

    match cfg.admin_seed() {
        Some((email, password)) => {
            accounts::seed_admin(&storage, email, password).await?;
        }
        None => {
            info!("APP_ADMIN_EMAIL/APP_ADMIN_PASSWORD not set; skipping admin seed");
        }
    }

    if !cfg.static_dir.is_dir() {
        warn!(path = %cfg.static_dir.display(), "static directory not found; only the API will be served");
    }

    let state = SiteState::from_config(storage, &cfg);
    let app = site_router(state, &cfg.static_dir);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
