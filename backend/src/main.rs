mod audit;
mod auth;
mod config;
mod error;
mod notifications;
mod rate_limit;
mod services;
mod state;
mod store;
mod validation;
mod workflow;

use crate::auth::StaticTokenProvider;
use crate::config::Config;
use crate::notifications::{NotificationRelay, WebhookSender, QUEUE_CAPACITY};
use crate::state::AppState;
use crate::store::Store;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        error!("invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    if config.admin_tokens.is_empty() {
        warn!("ADMIN_TOKENS is empty: every admin endpoint will answer 401");
    }
    if config.notify_webhook_url.is_none() {
        warn!("NOTIFY_WEBHOOK_URL not set: new submissions will not be relayed");
    }

    let store = Store::open(&config.database_path).map_err(|e| {
        error!("cannot open database {}: {}", config.database_path, e);
        std::io::Error::other(e.to_string())
    })?;

    // Notification relay: handlers enqueue, this worker delivers.
    let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
    let sender = WebhookSender::new(config.notify_webhook_url.clone(), config.notify_chat_id.clone());
    tokio::spawn(async move {
        notifications::start_notification_worker(sender, rx).await;
    });

    let identity = Arc::new(StaticTokenProvider::new(config.admin_tokens.clone()));
    let app_state = AppState::new(store, NotificationRelay::new(tx), identity)
        .with_trusted_proxy(config.trusted_proxy);

    let limiter = app_state.limiter.clone();
    tokio::spawn(async move {
        rate_limit::start_pruner(limiter, PRUNE_INTERVAL).await;
    });

    let url = format!("http://{}:{}", config.host, config.port);
    info!("Server running at {}", url);

    let json_limit = config.json_limit_bytes;
    HttpServer::new(move || {
        App::new()
            .app_data(services::json_config(json_limit))
            .app_data(web::Data::new(app_state.clone()))
            .configure(services::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
