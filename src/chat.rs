//! High-level chat driver.
//!
//! [`ChatClient`] owns the transport and credential source for one signed-in
//! user and runs turns against a caller-owned [`MessageReconciler`]:
//!
//! ```ignore
//! let client = ChatClient::from_config(ClientConfig::from_env())?;
//! let mut reconciler = MessageReconciler::new();
//! let (mut callbacks, mut updates) = ChannelCallbacks::channel();
//!
//! let outcome = client.send(&mut reconciler, None, "Hello", &mut callbacks).await?;
//! if let Some(id) = outcome.conversation_id.as_deref() {
//!     let view = client.refresh(&mut reconciler, id).await?;
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use futures::future;
use tracing::{debug, warn};

use crate::adapters::{EnvCredentialsProvider, FileCredentialsProvider, ReqwestHttpClient};
use crate::auth::Credentials;
use crate::cache::{ConversationKey, MessageReconciler};
use crate::config::ClientConfig;
use crate::conversations::ConversationClient;
use crate::error::{AuthError, ChatError, ChatResult};
use crate::models::{ConversationSnapshot, ConversationsPage, Message, MessageRole};
use crate::session::{ActiveTurns, TurnCallbacks, TurnOutcome, TurnSession};
use crate::traits::{CredentialsProvider, HttpClient};

pub struct ChatClient {
    http: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialsProvider>,
    config: ClientConfig,
    active: ActiveTurns,
}

impl ChatClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialsProvider>,
        config: ClientConfig,
    ) -> Self {
        Self {
            http,
            credentials,
            config,
            active: ActiveTurns::new(),
        }
    }

    /// Client over reqwest, with credentials from the environment falling
    /// back to the credentials file.
    pub fn from_config(config: ClientConfig) -> ChatResult<Self> {
        let http = ReqwestHttpClient::with_user_agent(&config.user_agent).map_err(|e| {
            ChatError::Config {
                message: format!("Failed to build HTTP client: {}", e),
            }
        })?;

        let credentials = match FileCredentialsProvider::new() {
            Ok(file) => EnvCredentialsProvider::with_fallback(file),
            Err(e) => {
                warn!(error = %e, "Credentials file unavailable, using environment only");
                EnvCredentialsProvider::new()
            }
        };

        Ok(Self::new(Arc::new(http), Arc::new(credentials), config))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Conversations with a turn currently in flight.
    pub fn active_turns(&self) -> &ActiveTurns {
        &self.active
    }

    /// Send `text` and stream the reply.
    ///
    /// The user message is buffered under the current key before the request
    /// goes out. When the server assigns a new id, everything buffered under
    /// [`ConversationKey::Unassigned`] moves to that id, and the finalized
    /// reply is buffered there too. Only one turn per key may run at a time.
    pub async fn send<C>(
        &self,
        reconciler: &mut MessageReconciler,
        conversation_id: Option<&str>,
        text: &str,
        callbacks: &mut C,
    ) -> ChatResult<TurnOutcome>
    where
        C: TurnCallbacks + ?Sized,
    {
        self.send_until(
            reconciler,
            conversation_id,
            text,
            callbacks,
            future::pending::<()>(),
        )
        .await
    }

    /// Like [`send`](Self::send), but abort when `cancel` resolves.
    pub async fn send_until<C, F>(
        &self,
        reconciler: &mut MessageReconciler,
        conversation_id: Option<&str>,
        text: &str,
        callbacks: &mut C,
        cancel: F,
    ) -> ChatResult<TurnOutcome>
    where
        C: TurnCallbacks + ?Sized,
        F: Future<Output = ()>,
    {
        let key = ConversationKey::for_conversation(conversation_id);
        let _guard = self.active.try_acquire(&key)?;

        let credentials = match self.load_credentials().await {
            Ok(credentials) => credentials,
            Err(err) => {
                callbacks.on_error(&err);
                return Err(err);
            }
        };

        reconciler.append(key.clone(), Message::local(MessageRole::User, text));

        let mut session = TurnSession::new(Arc::clone(&self.http), &self.config, credentials);
        let outcome = session
            .run_until(key.id().map(str::to_string), text, callbacks, cancel)
            .await?;

        let resolved = ConversationKey::from(outcome.conversation_id.clone());
        if outcome.new_conversation && key.is_unassigned() {
            reconciler.rekey(&key, resolved.clone());
        }
        reconciler.append(resolved, outcome.message.clone());

        Ok(outcome)
    }

    /// Fetch the stored history and return it merged with local messages.
    ///
    /// On success the local buffer for `conversation_id` is retired, unless
    /// a turn for it is still streaming.
    pub async fn refresh(
        &self,
        reconciler: &mut MessageReconciler,
        conversation_id: &str,
    ) -> ChatResult<Vec<Message>> {
        let snapshot = self.snapshot(conversation_id).await?;
        let key = ConversationKey::from(conversation_id);

        if self.active.is_active(&key) {
            debug!(conversation_id, "Turn in flight, keeping local messages");
        } else {
            reconciler.retire(&key);
        }

        Ok(reconciler.view(&key, &snapshot.messages))
    }

    /// Full stored history of one conversation.
    pub async fn snapshot(&self, conversation_id: &str) -> ChatResult<ConversationSnapshot> {
        self.conversations()
            .await?
            .fetch_snapshot(conversation_id)
            .await
    }

    /// One page of the conversation list.
    pub async fn list_conversations(&self, offset: u32) -> ChatResult<ConversationsPage> {
        self.conversations()
            .await?
            .list_conversations(None, offset)
            .await
    }

    async fn conversations(&self) -> ChatResult<ConversationClient> {
        let credentials = self.load_credentials().await?;
        let token = credentials
            .as_ref()
            .and_then(Credentials::token)
            .ok_or(AuthError::MissingToken)?;
        Ok(ConversationClient::new(Arc::clone(&self.http), self.config.clone()).with_auth(token))
    }

    async fn load_credentials(&self) -> ChatResult<Option<Credentials>> {
        self.credentials.load().await.map_err(|e| {
            AuthError::CredentialsLoadFailed {
                message: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryCredentials, MockHttpClient, MockResponse};
    use crate::session::RecordingCallbacks;
    use bytes::Bytes;

    fn chat_client(mock: &MockHttpClient, credentials: InMemoryCredentials) -> ChatClient {
        ChatClient::new(
            Arc::new(mock.clone()),
            Arc::new(credentials),
            ClientConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_send_new_conversation_migrates_unassigned() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://127.0.0.1:8000/chat/stream",
            MockResponse::Stream(vec![Bytes::from(
                "data: {\"conversation_id\":\"c-new\"}\ndata: {\"type\":\"text_delta\",\"text\":\"Hi\"}\n",
            )]),
        );
        let client = chat_client(
            &mock,
            InMemoryCredentials::with_credentials(Credentials::new("tok", "u1")),
        );
        let mut reconciler = MessageReconciler::new();

        let outcome = client
            .send(&mut reconciler, None, "Hello", &mut RecordingCallbacks::new())
            .await
            .unwrap();

        assert!(outcome.new_conversation);
        assert!(!reconciler.has_pending(&ConversationKey::Unassigned));
        let pending = reconciler.pending(&ConversationKey::from("c-new"));
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].role, MessageRole::User);
        assert_eq!(pending[1].content, "Hi");
        assert!(client.active_turns().is_empty());
    }

    #[tokio::test]
    async fn test_credentials_load_failure_reported() {
        let mock = MockHttpClient::new();
        let credentials = InMemoryCredentials::new();
        credentials.set_load_should_fail(true);
        let client = chat_client(&mock, credentials);
        let mut callbacks = RecordingCallbacks::new();

        let err = client
            .send(&mut MessageReconciler::new(), Some("c1"), "q", &mut callbacks)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ChatError::Auth(AuthError::CredentialsLoadFailed { .. })
        ));
        assert_eq!(callbacks.errors().len(), 1);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_list_requires_token() {
        let mock = MockHttpClient::new();
        let client = chat_client(&mock, InMemoryCredentials::new());
        let err = client.list_conversations(0).await.unwrap_err();
        assert_eq!(err, ChatError::Auth(AuthError::MissingToken));
    }
}
