//! Caller-side conversation transcript
//!
//! The engine never reads this transcript; it only exists so callers can
//! display the exchange and enforce one pending response at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Classification;
use crate::scheduler::ResponseScheduler;
use crate::{Error, Result};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the transcript
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConversationMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    /// Create a message stamped with a fresh id and the current time
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Message typed by the user
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Message produced by the help engine
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Reply delivered for one submitted turn
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub classification: Classification,
    pub message: ConversationMessage,
}

/// Clears the pending flag when the turn finishes, even on panic
struct PendingGuard(Arc<AtomicBool>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A single conversation with at most one response in flight
#[derive(Debug, Clone)]
pub struct Conversation {
    scheduler: ResponseScheduler,
    messages: Arc<Mutex<Vec<ConversationMessage>>>,
    pending: Arc<AtomicBool>,
}

impl Conversation {
    /// Start an empty conversation
    #[must_use]
    pub fn new(scheduler: ResponseScheduler) -> Self {
        Self {
            scheduler,
            messages: Arc::new(Mutex::new(Vec::new())),
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Submit user input and wait for the assistant's reply
    ///
    /// Blank input is suppressed: nothing is recorded and `Ok(None)` is
    /// returned. Otherwise the user message is recorded immediately and the
    /// assistant message once the thinking delay has elapsed. Dropping the
    /// returned future does not cancel the turn; the reply is still recorded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResponsePending`] if a previous turn has not been
    /// answered yet, or a scheduler error if the turn's task fails
    pub async fn submit(&self, input: &str) -> Result<Option<Reply>> {
        if crate::normalize::is_blank(input) {
            return Ok(None);
        }

        if self
            .pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::ResponsePending);
        }
        let guard = PendingGuard(Arc::clone(&self.pending));

        self.lock_messages().push(ConversationMessage::user(input));

        let messages = Arc::clone(&self.messages);
        let pending = self.scheduler.dispatch_then(input, move |classification| {
            let message = ConversationMessage::assistant(classification.text());
            messages
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(message.clone());
            drop(guard);
            Reply {
                classification,
                message,
            }
        });

        match pending {
            Some(pending) => pending.wait().await.map(Some),
            // Not reachable for non-blank input; the guard was dropped with the closure
            None => Ok(None),
        }
    }

    /// Whether a response is still pending
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Snapshot of the transcript
    #[must_use]
    pub fn messages(&self) -> Vec<ConversationMessage> {
        self.lock_messages().clone()
    }

    fn lock_messages(&self) -> std::sync::MutexGuard<'_, Vec<ConversationMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
