//! One user-message exchange.

use std::future::Future;
use std::sync::Arc;

use futures::future;
use futures::StreamExt;
use tracing::{debug, error, info, trace};

use super::callbacks::TurnCallbacks;
use super::state::TurnState;
use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::{AuthError, ChatError, ChatResult, TransportError};
use crate::models::{ChatStreamRequest, Message, MessageRole};
use crate::sse::{event_stream, EventRecord};
use crate::traits::{Headers, HttpClient};

/// Result of a completed turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// The conversation the reply belongs to, if it is known
    pub conversation_id: Option<String>,
    /// True when the id was announced by the server during this turn
    pub new_conversation: bool,
    /// The finalized assistant reply
    pub message: Message,
    /// The last summary count seen, if any
    pub message_count: Option<u64>,
}

/// Drives one streaming exchange from request to finalized reply.
///
/// A session can be reused for another exchange once the previous one has
/// reached a terminal state.
pub struct TurnSession {
    http: Arc<dyn HttpClient>,
    stream_url: String,
    credentials: Option<Credentials>,
    state: TurnState,
    conversation_id: Option<String>,
    new_conversation: bool,
    accumulated: String,
    message_count: Option<u64>,
}

impl TurnSession {
    pub fn new(
        http: Arc<dyn HttpClient>,
        config: &ClientConfig,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            http,
            stream_url: config.stream_url(),
            credentials,
            state: TurnState::Idle,
            conversation_id: None,
            new_conversation: false,
            accumulated: String::new(),
            message_count: None,
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// The conversation id supplied or adopted so far.
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// Reply text received so far in the current exchange.
    pub fn accumulated(&self) -> &str {
        &self.accumulated
    }

    /// Send `text` and stream the reply until the server closes the body.
    ///
    /// With `conversation_id` unset, the first conversation announcement on
    /// the stream is adopted and reported through `on_start`.
    pub async fn begin<C>(
        &mut self,
        conversation_id: Option<String>,
        text: &str,
        callbacks: &mut C,
    ) -> ChatResult<TurnOutcome>
    where
        C: TurnCallbacks + ?Sized,
    {
        self.run_until(conversation_id, text, callbacks, future::pending::<()>())
            .await
    }

    /// Like [`begin`](Self::begin), but stop when `cancel` resolves.
    ///
    /// A cancelled turn ends in [`TurnState::Aborted`] with
    /// [`TransportError::Cancelled`]. No message is produced and `on_error`
    /// does not fire.
    pub async fn run_until<C, F>(
        &mut self,
        conversation_id: Option<String>,
        text: &str,
        callbacks: &mut C,
        cancel: F,
    ) -> ChatResult<TurnOutcome>
    where
        C: TurnCallbacks + ?Sized,
        F: Future<Output = ()>,
    {
        self.reset(conversation_id);

        let result = tokio::select! {
            biased;
            _ = cancel => None,
            result = self.drive(text, callbacks) => Some(result),
        };

        match result {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(err)) => {
                self.abort();
                error!(
                    code = err.error_code(),
                    conversation_id = ?self.conversation_id,
                    "Turn aborted: {}",
                    err
                );
                callbacks.on_error(&err);
                Err(err)
            }
            None => {
                self.abort();
                info!(conversation_id = ?self.conversation_id, "Turn cancelled");
                Err(TransportError::Cancelled.into())
            }
        }
    }

    fn reset(&mut self, conversation_id: Option<String>) {
        self.state = TurnState::Idle;
        self.conversation_id = conversation_id.filter(|id| !id.is_empty());
        self.new_conversation = false;
        self.accumulated.clear();
        self.message_count = None;
    }

    async fn drive<C>(&mut self, text: &str, callbacks: &mut C) -> ChatResult<TurnOutcome>
    where
        C: TurnCallbacks + ?Sized,
    {
        self.transition(TurnState::Requesting);

        let (token, user_id) = self.identity()?;
        let request = ChatStreamRequest::new(text, user_id)
            .with_conversation(self.conversation_id.clone());
        let body = serde_json::to_string(&request).map_err(|e| ChatError::Config {
            message: format!("Failed to encode chat request: {}", e),
        })?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));

        debug!(url = %self.stream_url, conversation_id = ?self.conversation_id, "Starting turn");
        let response = self
            .http
            .post_stream(&self.stream_url, &body, &headers)
            .await
            .map_err(|e| {
                ChatError::from_transport(
                    TransportError::from_http(e, &self.stream_url),
                    self.conversation_id.as_deref(),
                )
            })?;

        self.transition(TurnState::Streaming);

        let mut events = Box::pin(event_stream(response));
        while let Some(event) = events.next().await {
            match event {
                EventRecord::Lifecycle { conversation_id } => {
                    if self.conversation_id.is_none() {
                        debug!(conversation_id = %conversation_id, "Adopted conversation id");
                        callbacks.on_start(&conversation_id);
                        self.conversation_id = Some(conversation_id);
                        self.new_conversation = true;
                    } else {
                        trace!(conversation_id = %conversation_id, "Ignoring repeated announcement");
                    }
                }
                EventRecord::ContentDelta { text } => {
                    self.accumulated.push_str(&text);
                    callbacks.on_content(&text);
                }
                EventRecord::Summary { message_count } => {
                    self.message_count = Some(message_count);
                    callbacks.on_summary(message_count);
                }
                EventRecord::Error(err) => return Err(err.into()),
                EventRecord::Unrecognized(_) => {}
            }
        }

        Ok(self.finalize(callbacks))
    }

    fn identity(&self) -> ChatResult<(String, String)> {
        let credentials = self.credentials.as_ref().ok_or(AuthError::MissingToken)?;
        let token = credentials.token().ok_or(AuthError::MissingToken)?;
        let user_id = credentials
            .user_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or(AuthError::MissingUserId)?;
        Ok((token.to_string(), user_id.to_string()))
    }

    fn finalize<C>(&mut self, callbacks: &mut C) -> TurnOutcome
    where
        C: TurnCallbacks + ?Sized,
    {
        self.transition(TurnState::Finalizing);

        let content = std::mem::take(&mut self.accumulated);
        let message = Message::local(MessageRole::Assistant, content);
        self.transition(TurnState::Done);

        if let Some(id) = self.conversation_id.as_deref() {
            callbacks.on_complete(id);
        }
        debug!(
            conversation_id = ?self.conversation_id,
            chars = message.content.chars().count(),
            "Turn complete"
        );

        TurnOutcome {
            conversation_id: self.conversation_id.clone(),
            new_conversation: self.new_conversation,
            message,
            message_count: self.message_count,
        }
    }

    fn abort(&mut self) {
        self.accumulated.clear();
        if self.state.can_transition_to(TurnState::Aborted) {
            self.transition(TurnState::Aborted);
        } else {
            self.state = TurnState::Aborted;
        }
    }

    fn transition(&mut self, next: TurnState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal turn transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "Turn state");
        self.state = next;
    }
}
