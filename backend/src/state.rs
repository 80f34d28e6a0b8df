//! Shared application state, injected into every handler as `web::Data`.

use crate::audit::AuditLogger;
use crate::auth::IdentityProvider;
use crate::notifications::NotificationRelay;
use crate::rate_limit::RateLimiter;
use crate::store::Store;
use actix_web::HttpRequest;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub limiter: RateLimiter,
    pub relay: NotificationRelay,
    pub audit: AuditLogger,
    pub identity: Arc<dyn IdentityProvider>,
    /// Whether `Forwarded`/`X-Forwarded-For` come from our own reverse proxy.
    pub trusted_proxy: bool,
}

impl AppState {
    pub fn new(store: Store, relay: NotificationRelay, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            audit: AuditLogger::new(store.clone()),
            store,
            limiter: RateLimiter::new(),
            relay,
            identity,
            trusted_proxy: false,
        }
    }

    pub fn with_trusted_proxy(mut self, trusted: bool) -> Self {
        self.trusted_proxy = trusted;
        self
    }

    /// Rate-limit key of the caller.
    ///
    /// The socket peer address, unless the server sits behind a trusted proxy,
    /// in which case the forwarded client address is used. Forwarded headers
    /// from an untrusted peer are ignored: the caller controls them.
    pub fn client_key(&self, req: &HttpRequest) -> String {
        if self.trusted_proxy {
            if let Some(addr) = req.connection_info().realip_remote_addr() {
                return addr.to_string();
            }
        }
        req.peer_addr()
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
