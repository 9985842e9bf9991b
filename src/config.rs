//! Client configuration.
//!
//! Use the builder methods to customize, or [`ClientConfig::from_env`] to
//! pick up the server URL from the environment.
//!
//! ```ignore
//! use chatline::config::ClientConfig;
//!
//! let config = ClientConfig::default()
//!     .with_api_url("https://chat.example.com")
//!     .with_history_page_limit(50);
//! ```

/// Default server when `CHATLINE_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the server URL.
pub const API_URL_ENV: &str = "CHATLINE_API_URL";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the chat server, without a trailing slash
    pub api_url: String,
    /// Messages requested per history page (default: 25)
    pub history_page_limit: u32,
    /// Conversations requested per listing page (default: 20)
    pub conversations_page_limit: u32,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            history_page_limit: 25,
            conversations_page_limit: 20,
            user_agent: format!("chatline/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server URL. A trailing slash is removed.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.api_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_history_page_limit(mut self, limit: u32) -> Self {
        self.history_page_limit = limit.max(1);
        self
    }

    pub fn with_conversations_page_limit(mut self, limit: u32) -> Self {
        self.conversations_page_limit = limit.max(1);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Defaults, with `CHATLINE_API_URL` applied when it is set and non-empty.
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::default().with_api_url(url.trim()),
            _ => Self::default(),
        }
    }

    /// `POST` target for streaming turns.
    pub fn stream_url(&self) -> String {
        format!("{}/chat/stream", self.api_url)
    }

    /// `GET` target for the conversation listing.
    pub fn conversations_url(&self) -> String {
        format!("{}/chat/conversations", self.api_url)
    }

    /// `GET` target for one conversation. The id is percent-encoded.
    pub fn conversation_url(&self, conversation_id: &str) -> String {
        format!(
            "{}/chat/conversation/{}",
            self.api_url,
            urlencoding::encode(conversation_id)
        )
    }
}
