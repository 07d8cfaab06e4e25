//! # Warung Site
//!
//! Serves a restaurant site bound from a single TOML document, with cart
//! sessions that hand orders off to a messaging app.
//!
//! ## Usage
//!
//! ```bash
//! # Optional environment variables
//! export SITE_CONFIG=config/site.toml
//! export ADMIN_TOKEN=change-me
//! export SESSION_TTL_MINUTES=120
//! export MAX_SESSIONS=10000
//!
//! # Run the server
//! warung-site
//! ```

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use warung_api::{routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    {
        let site = state.site.read().await;
        info!("Environment: {}", state.config.environment);
        info!("Business: {}", site.config.identity.name);
        info!("Categories: {}", site.config.catalog.len());
        if !site.findings.is_empty() {
            info!("Validation findings: {} (serving anyway)", site.findings.len());
        }
    }
    if state.config.admin_token.is_none() {
        info!("ADMIN_TOKEN not set, admin routes are open");
    }

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🍛 Warung site starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("🧾 Regions: GET http://{}/api/v1/site/regions", addr);
        info!("🛒 Sessions: POST http://{}/api/v1/sessions", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  🍛 Warung Site RS 🍛
  ━━━━━━━━━━━━━━━━━━━━━━━
  Config-driven restaurant site
  Version: {}
  
"#,
        env!("CARGO_PKG_VERSION")
    );
}
