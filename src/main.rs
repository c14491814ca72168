//! The Slack integration service for the content calendar.
//!
//! For a high-level introduction see the crate documentation.

use almanac::{
    config::Config,
    router::{self, Deps},
    slack::{api::SlackClient, auth::SlackAccessToken},
};
use dotenvy::dotenv;
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{info, warn};

/// Application entrypoint. Initialises tracing, reads configuration from the
/// environment, binds to 0.0.0.0, and starts the server.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    let config = Config::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {}", e));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    server_(listener, deps(&config)).await;
}

/// Assemble route dependencies, warning about anything missing.
fn deps(config: &Config) -> Deps {
    let slack_token = config.slack_token.clone().unwrap_or_else(|| {
        warn!("No $SLACK_BOT_TOKEN environment variable found");
        SlackAccessToken(String::new())
    });

    if config.signing_secret.is_none() {
        warn!("No $SLACK_SIGNING_SECRET environment variable found");
    }

    Deps {
        slack_client: Arc::new(SlackClient::new(
            config.slack_api_base.clone(),
            slack_token,
        )),
        signing_secret: config.signing_secret.clone(),
        calendar_base: config.calendar_base(),
        public_dir: config.public_dir.clone(),
    }
}

/// Initialise a server without graceful shutdown.
async fn server_(listener: TcpListener, deps: Deps) {
    // Giving a receiver that will never resolve.
    let (_tx, rx) = oneshot::channel::<()>();
    server(listener, deps, rx).await;
}

/// Initialise a server with graceful shutdown via `rx`.
async fn server(listener: TcpListener, deps: Deps, rx: oneshot::Receiver<()>) {
    if let Ok(addr) = listener.local_addr() {
        info!("⚡️ Social Media Calendar app is running on {}", addr);
    }

    axum::serve(listener, router::new(deps))
        .with_graceful_shutdown(async {
            rx.await.ok();
        })
        .await
        .expect("Failed to start server");
}
