mod config;

use api_server::{router, AppState, USER_ID_HEADER};
use application::TutorialApp;
use config::Config;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    info!("🚀 Starting tutorial content service");
    config.log_summary();

    let tutorial_app = Arc::new(TutorialApp::new(
        &config.database_path,
        config.database_pool_size,
    )?);

    match &config.admin {
        Some(admin) => {
            let user = tutorial_app
                .ensure_admin(&admin.username, &admin.email)
                .await?;
            info!(
                "👤 Admin {} ready, authenticate with {}: {}",
                user.username, USER_ID_HEADER, user.id
            );
        }
        None => warn!("ADMIN_USERNAME/ADMIN_EMAIL not set, no admin account bootstrapped"),
    }

    let app = router(AppState { tutorial_app });

    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("🌐 API Server listening on http://{}", bind_address);
    info!("   GET     /content      - List all content");
    info!("   POST    /content      - Create content (admin)");
    info!("   GET     /content/:id  - Get content");
    info!("   PUT     /content/:id  - Update content (admin)");
    info!("   DELETE  /content/:id  - Delete content and its ratings (admin)");
    info!("   GET     /health       - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Tutorial content service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl+C, running until killed");
        std::future::pending::<()>().await;
    }
}
