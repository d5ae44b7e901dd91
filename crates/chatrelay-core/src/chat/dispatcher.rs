//! The exchange pipeline shared by both front-ends.
//!
//! `dispatch` validates the message, serializes exchanges per user, builds
//! the request from stored history, awaits the provider under a timeout and
//! records the exchange only once a non-empty reply has arrived. A failed
//! call leaves the user's history exactly as it was.

use std::sync::Arc;
use std::time::Duration;

use chatrelay_types::chat::{ConversationExport, ConversationStats, Turn, UserKey};
use chatrelay_types::llm::LlmError;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::chat::prompt::{PromptAssembler, PromptConfig};
use crate::llm::box_provider::BoxLlmProvider;
use crate::memory::store::ConversationStore;

/// Errors from [`Dispatcher::dispatch`].
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("message cannot be empty")]
    EmptyMessage,

    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl DispatchError {
    /// Text safe to show the person who sent the message.
    pub fn user_message(&self) -> &'static str {
        match self {
            DispatchError::EmptyMessage => "Message cannot be empty",
            DispatchError::Llm(e) => e.user_message(),
        }
    }
}

/// One async mutex per user key; exchanges for a key run one at a time.
#[derive(Debug, Clone, Default)]
pub struct UserLocks {
    locks: Arc<DashMap<UserKey, Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, user: &UserKey) -> Arc<Mutex<()>> {
        Arc::clone(&self.locks.entry(user.clone()).or_default())
    }
}

/// Runs chat exchanges against one provider with one prompt preset.
///
/// Cheap to clone. [`Dispatcher::with_prompt`] derives a dispatcher for
/// another front-end that shares the store, provider and locks.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: ConversationStore,
    assembler: PromptAssembler,
    provider: Arc<BoxLlmProvider>,
    locks: UserLocks,
    request_timeout: Duration,
}

impl Dispatcher {
    pub fn new(
        store: ConversationStore,
        provider: Arc<BoxLlmProvider>,
        prompt: PromptConfig,
        request_timeout: Duration,
    ) -> Self {
        Self {
            assembler: PromptAssembler::new(store.clone(), prompt),
            store,
            provider,
            locks: UserLocks::new(),
            request_timeout,
        }
    }

    /// A dispatcher using `prompt` over the same store, provider and locks.
    pub fn with_prompt(&self, prompt: PromptConfig) -> Self {
        Self {
            assembler: PromptAssembler::new(self.store.clone(), prompt),
            store: self.store.clone(),
            provider: Arc::clone(&self.provider),
            locks: self.locks.clone(),
            request_timeout: self.request_timeout,
        }
    }

    pub fn provider(&self) -> &BoxLlmProvider {
        &self.provider
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Produce a reply to `message` for `user` and record the exchange.
    pub async fn dispatch(&self, user: &UserKey, message: &str) -> Result<String, DispatchError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DispatchError::EmptyMessage);
        }

        let lock = self.locks.lock_for(user);
        let _guard = lock.lock().await;

        let request = self.assembler.build(user, message);
        debug!(
            user = %user,
            messages = request.messages.len(),
            model = %request.model,
            "Sending completion request"
        );

        let response =
            match tokio::time::timeout(self.request_timeout, self.provider.complete(&request))
                .await
            {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    warn!(user = %user, provider = self.provider.name(), error = %e, "Completion failed");
                    return Err(e.into());
                }
                Err(_) => {
                    let secs = self.request_timeout.as_secs();
                    warn!(user = %user, provider = self.provider.name(), timeout_secs = secs, "Completion timed out");
                    return Err(LlmError::Timeout(secs).into());
                }
            };

        let reply = response.content.trim();
        if reply.is_empty() {
            warn!(user = %user, provider = self.provider.name(), "Provider returned an empty reply");
            return Err(LlmError::EmptyResponse(self.provider.name().to_string()).into());
        }

        self.store.append_exchange(user, message, reply);
        info!(
            user = %user,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            reply_chars = reply.chars().count(),
            "Exchange recorded"
        );
        Ok(reply.to_string())
    }

    /// Forget `user`'s conversation. Returns whether there was any.
    ///
    /// Waits for an in-flight exchange for `user` to finish first, so its
    /// turns cannot land after the clear.
    pub async fn clear(&self, user: &UserKey) -> bool {
        let lock = self.locks.lock_for(user);
        let _guard = lock.lock().await;
        let cleared = self.store.clear(user);
        info!(user = %user, cleared, "Conversation cleared");
        cleared
    }

    pub fn history(&self, user: &UserKey) -> Vec<Turn> {
        self.store.get(user)
    }

    pub fn export(&self, user: &UserKey) -> ConversationExport {
        self.store.export(user)
    }

    pub fn stats(&self) -> ConversationStats {
        self.store.stats()
    }
}
