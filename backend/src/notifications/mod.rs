//! Best-effort relay of new-submission events to a chat channel.
//!
//! Request handlers call [`NotificationRelay::notify`], which only pushes the
//! event into a bounded MPSC queue and returns. A long-running worker task,
//! spawned from `main.rs`, drains the queue and posts each event to the
//! configured webhook. Nothing is retried; a full queue, a missing webhook or a
//! failed HTTP call is logged and the event is dropped.

mod webhook;

pub use webhook::WebhookSender;

use log::{error, warn};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

/// Capacity of the relay queue. Events past it are dropped.
pub const QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NewSubmission,
    NewBulkSubmission,
}

impl EventKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::NewSubmission => "Nova igreja enviada para moderação",
            Self::NewBulkSubmission => "Nova mensagem enviada para moderação",
        }
    }
}

/// An event waiting in the relay queue.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub kind: EventKind,
    pub payload: Value,
}

#[derive(Clone)]
pub struct NotificationRelay {
    tx: mpsc::Sender<Notification>,
}

impl NotificationRelay {
    pub fn new(tx: mpsc::Sender<Notification>) -> Self {
        Self { tx }
    }

    /// Queues an event without waiting. Never fails the caller.
    pub fn notify(&self, kind: EventKind, payload: Value) {
        if let Err(e) = self.tx.try_send(Notification { kind, payload }) {
            warn!("notification {:?} dropped: {}", kind, e);
        }
    }
}

/// Drains the relay queue until every sender is gone.
pub async fn start_notification_worker(sender: WebhookSender, mut rx: mpsc::Receiver<Notification>) {
    while let Some(notification) = rx.recv().await {
        if let Err(e) = sender.send(&notification).await {
            error!("notification {:?} failed: {}", notification.kind, e);
        }
    }
}
