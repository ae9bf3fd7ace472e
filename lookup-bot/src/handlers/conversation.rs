//! Per-caller conversation queue.
//!
//! Each caller id gets an unbounded queue and one task that owns that caller's [`Session`], so a
//! caller's events are processed strictly in arrival order while different callers run
//! concurrently. `handle` only enqueues and returns `Stop`.

use async_trait::async_trait;
use dashmap::DashMap;
use dbot_core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use crate::session::{Session, SessionEngine};

type QueueSender = mpsc::UnboundedSender<Message>;

pub struct ConversationHandler {
    engine: Arc<SessionEngine>,
    queues: DashMap<i64, QueueSender>,
}

impl ConversationHandler {
    pub fn new(engine: Arc<SessionEngine>) -> Self {
        Self {
            engine,
            queues: DashMap::new(),
        }
    }

    fn spawn_queue(&self, user_id: i64) -> QueueSender {
        let (tx, rx) = mpsc::unbounded_channel::<Message>();
        tokio::spawn(Self::process_queue_loop(rx, self.engine.clone(), user_id));
        tx
    }

    /// Owns the caller's session for the lifetime of the queue.
    async fn process_queue_loop(
        mut rx: mpsc::UnboundedReceiver<Message>,
        engine: Arc<SessionEngine>,
        user_id: i64,
    ) {
        let mut session = Session::new();
        while let Some(message) = rx.recv().await {
            if let Err(e) = engine.process(&mut session, &message).await {
                error!(
                    error = %e,
                    user_id = user_id,
                    mode = session.pending().label(),
                    "Failed to process queued event"
                );
            }
        }
    }
}

#[async_trait]
impl Handler for ConversationHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        let tx = self
            .queues
            .entry(user_id)
            .or_insert_with(|| {
                info!(user_id = user_id, "Opening session queue");
                self.spawn_queue(user_id)
            })
            .clone();

        if tx.send(message.clone()).is_err() {
            error!(user_id = user_id, "Failed to send event to queue (receiver dropped)");
            self.queues.remove(&user_id);
        }
        Ok(HandlerResponse::Stop)
    }
}
