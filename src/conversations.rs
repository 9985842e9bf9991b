//! Client for the conversation store.
//!
//! - `GET /chat/conversations?limit=&offset=` lists conversations
//! - `GET /chat/conversation/{id}?include_messages=&limit=[&cursor=]` returns
//!   one page of history; `cursor` is only sent after the first page
//!
//! A 401 from either endpoint means the token is no longer accepted and is
//! reported as [`AuthError::Unauthorized`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{AuthError, ChatError, ChatResult, ResultExt, TransportError};
use crate::models::{ConversationDetails, ConversationSnapshot, ConversationsPage};
use crate::traits::{Headers, HttpClient};

/// Upper bound on pages followed by [`ConversationClient::fetch_snapshot`].
const MAX_SNAPSHOT_PAGES: usize = 1000;

/// Read access to stored conversations.
pub struct ConversationClient {
    http: Arc<dyn HttpClient>,
    config: ClientConfig,
    auth_token: Option<String>,
}

impl ConversationClient {
    pub fn new(http: Arc<dyn HttpClient>, config: ClientConfig) -> Self {
        Self {
            http,
            config,
            auth_token: None,
        }
    }

    /// Set the bearer token.
    pub fn with_auth(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// List conversations, newest first as ordered by the server.
    ///
    /// `limit` defaults to the configured page size.
    pub async fn list_conversations(
        &self,
        limit: Option<u32>,
        offset: u32,
    ) -> ChatResult<ConversationsPage> {
        let limit = limit.unwrap_or(self.config.conversations_page_limit);
        let url = format!(
            "{}?limit={}&offset={}",
            self.config.conversations_url(),
            limit,
            offset
        );
        let body = self.get_json(&url, None).await?;
        serde_json::from_slice(&body).invalid_response("/chat/conversations")
    }

    /// Fetch one page of a conversation.
    pub async fn conversation_details(
        &self,
        conversation_id: &str,
        include_messages: bool,
        limit: Option<u32>,
        cursor: Option<&str>,
    ) -> ChatResult<ConversationDetails> {
        let limit = limit.unwrap_or(self.config.history_page_limit);
        let mut url = format!(
            "{}?include_messages={}&limit={}",
            self.config.conversation_url(conversation_id),
            include_messages,
            limit
        );
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            url.push_str("&cursor=");
            url.push_str(&urlencoding::encode(cursor));
        }
        let body = self.get_json(&url, Some(conversation_id)).await?;
        serde_json::from_slice(&body).invalid_response("/chat/conversation")
    }

    /// Fetch the whole history of a conversation by following cursors.
    ///
    /// Pages are assumed to arrive oldest first. Stops early if the server
    /// repeats a cursor.
    pub async fn fetch_snapshot(&self, conversation_id: &str) -> ChatResult<ConversationSnapshot> {
        let mut snapshot = ConversationSnapshot::new(conversation_id);
        let mut cursor: Option<String> = None;

        for page_number in 0..MAX_SNAPSHOT_PAGES {
            let page = self
                .conversation_details(conversation_id, true, None, cursor.as_deref())
                .await?;
            let next = page.continuation().map(str::to_string);
            debug!(
                conversation_id,
                page = page_number,
                messages = page.messages.len(),
                "Fetched history page"
            );
            snapshot.extend_page(page);

            match next {
                Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                    warn!(conversation_id, cursor = %next, "History cursor did not advance");
                    break;
                }
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(snapshot)
    }

    fn headers(&self) -> ChatResult<Headers> {
        let token = self
            .auth_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(AuthError::MissingToken)?;

        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        Ok(headers)
    }

    async fn get_json(&self, url: &str, resource: Option<&str>) -> ChatResult<bytes::Bytes> {
        let headers = self.headers()?;
        let response = self
            .http
            .get(url, &headers)
            .await
            .map_err(|e| ChatError::from_transport(TransportError::from_http(e, url), resource))?;

        if !response.is_success() {
            let err = TransportError::HttpStatus {
                status: response.status,
                message: response.text_lossy(),
            };
            return Err(ChatError::from_transport(err, resource));
        }

        Ok(response.body)
    }
}
