//! Turns one line of user input into transcript entries.
//!
//! The dispatcher holds a single execution slot. A plugin run owns the slot
//! from the moment its pending placeholder is appended until the placeholder
//! reaches a terminal state; input arriving meanwhile is recorded but not
//! acted on.
//!
//! The history file is written after each change, on the blocking pool and
//! outside the store lock. Writes are serialized so the file never goes back
//! to an older transcript.

use std::sync::Arc;

use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, warn};

use crate::core::constants::random_conversational_reply;
use crate::core::history::MessageStore;
use crate::core::message::{Completion, Message};
use crate::plugins::engine::{self, ExecutionResult};
use crate::plugins::registry::Registry;

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Blank input; nothing recorded.
    Ignored,
    /// No skill matched; the canned reply that was appended.
    Conversational(Message),
    /// A skill ran; `message` is the plugin message in its terminal state.
    Dispatched {
        message: Message,
        result: ExecutionResult,
    },
    /// Another execution holds the slot; only the user message was recorded.
    Busy,
}

pub struct Dispatcher {
    registry: Arc<Registry>,
    store: Arc<Mutex<MessageStore>>,
    slot: Semaphore,
    save_turn: Mutex<()>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>, store: Arc<Mutex<MessageStore>>) -> Self {
        Self {
            registry,
            store,
            slot: Semaphore::new(1),
            save_turn: Mutex::new(()),
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn store(&self) -> &Arc<Mutex<MessageStore>> {
        &self.store
    }

    pub fn is_busy(&self) -> bool {
        self.slot.available_permits() == 0
    }

    pub async fn clear(&self) {
        self.store.lock().await.clear();
        self.persist().await;
    }

    /// Writes the current transcript if the store is file-backed.
    async fn persist(&self) {
        let _turn = self.save_turn.lock().await;
        let Some(snapshot) = self.store.lock().await.snapshot() else {
            return;
        };

        match tokio::task::spawn_blocking(move || snapshot.write()).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(error = %err, "history not saved"),
            Err(err) => warn!(error = %err, "history writer did not finish"),
        }
    }

    pub async fn submit(&self, input: &str) -> Submission {
        let text = input.trim();
        if text.is_empty() {
            return Submission::Ignored;
        }

        let Ok(_permit) = self.slot.try_acquire() else {
            debug!("execution slot busy, input recorded only");
            self.store.lock().await.append(Message::user(text));
            self.persist().await;
            return Submission::Busy;
        };

        let Some(command) = self.registry.resolve(text) else {
            let reply = Message::assistant(random_conversational_reply());
            {
                let mut store = self.store.lock().await;
                store.append(Message::user(text));
                store.append(reply.clone());
            }
            self.persist().await;
            return Submission::Conversational(reply);
        };

        let mut pending = Message::pending_plugin(command.plugin.name());
        let pending_id = pending.id;
        {
            let mut store = self.store.lock().await;
            store.append(Message::user(text));
            store.append(pending.clone());
        }
        self.persist().await;

        let result = engine::run(command.plugin.as_ref(), &command.raw_input).await;
        let completion = match &result {
            ExecutionResult::Success { data } => Completion::Success(data.clone()),
            ExecutionResult::Failure { reason } => Completion::Error(reason.clone()),
        };

        let message = {
            let mut store = self.store.lock().await;
            store.complete(pending_id, completion.clone());
            match store.get(pending_id) {
                Some(stored) => stored.clone(),
                // Cleared while running; report the outcome anyway.
                None => {
                    pending.complete(completion);
                    pending
                }
            }
        };
        self.persist().await;

        Submission::Dispatched { message, result }
    }
}
