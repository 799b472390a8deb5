//! Push SDK Trait Abstractions
//!
//! The messaging SDK is an external collaborator: everything it does (inbox
//! listing, chat transport, streams) sits behind `PushSdk` / `PushSession`.
//! `MockPushSdk` replaces it in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque SDK response, returned to callers untouched.
pub type Response = serde_json::Value;

/// Blockchain-style account address (`0x` + 40 hex digits, lowercase)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Byte length of an address.
    pub const LEN: usize = 20;

    /// Parse and normalize an address.
    ///
    /// Accepts an optional `0x`/`0X` prefix and mixed-case hex digits.
    pub fn parse(input: &str) -> PushResult<Self> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != Self::LEN * 2 {
            return Err(PushError::InvalidAddress(format!(
                "expected {} hex digits, got {}: {}",
                Self::LEN * 2,
                digits.len(),
                input
            )));
        }

        let bytes = hex::decode(digits)
            .map_err(|e| PushError::InvalidAddress(format!("{}: {}", input, e)))?;

        Ok(Self::from_bytes(&bytes))
    }

    /// Build an address from raw bytes. Panics if `bytes` is not 20 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert_eq!(bytes.len(), Self::LEN, "Address must be 20 bytes");
        Self(format!("0x{}", hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw address bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        // Constructors guarantee a valid `0x`-prefixed hex body.
        hex::decode(&self.0[2..]).unwrap_or_default()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Address {
    type Err = PushError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// SDK environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    Prod,
    #[default]
    Staging,
    Dev,
    Local,
}

impl Env {
    pub fn as_str(&self) -> &'static str {
        match self {
            Env::Prod => "prod",
            Env::Staging => "staging",
            Env::Dev => "dev",
            Env::Local => "local",
        }
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options passed to session creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    pub env: Env,
    pub account: Address,
}

/// Inbox page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboxQuery {
    /// 1-based page index
    pub page: u32,
    pub limit: u32,
}

/// Chat content type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    Text,
}

/// Typed chat payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContent {
    pub message_type: MessageType,
    pub content: String,
}

impl ChatContent {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::Text,
            content: content.into(),
        }
    }
}

/// Realtime stream event category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamCategory {
    Notification,
    Chat,
}

/// Event delivered on a realtime stream
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEvent {
    pub category: StreamCategory,
    pub payload: Response,
}

/// Facade operation labels, used for logging and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Initialize,
    GetNotifications,
    SendMessage,
    GetChatHistory,
    SubscribeToChannel,
    CreateStream,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Initialize => "initialize",
            Operation::GetNotifications => "get_notifications",
            Operation::SendMessage => "send_message",
            Operation::GetChatHistory => "get_chat_history",
            Operation::SubscribeToChannel => "subscribe_to_channel",
            Operation::CreateStream => "create_stream",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for Push operations
pub type PushResult<T> = Result<T, PushError>;

/// Push client errors
///
/// `Clone + PartialEq` so a propagated error can be compared with the one
/// the SDK produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PushError {
    #[error("Push client not initialized")]
    NotInitialized,

    #[error("Signer error: {0}")]
    Signer(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Caller-supplied credential able to produce an address and sign
#[async_trait]
pub trait SigningIdentity: Send + Sync {
    /// Account address controlled by this identity
    async fn address(&self) -> PushResult<Address>;

    /// Sign an arbitrary payload
    async fn sign(&self, payload: &[u8]) -> PushResult<Vec<u8>>;
}

/// Session-creation entry point of the messaging SDK
#[async_trait]
pub trait PushSdk: Send + Sync {
    /// Opaque session handle; the facade never inspects it.
    type Session: PushSession;

    /// Create a session for `identity` on the account/env in `options`.
    async fn initialize(
        &self,
        identity: Arc<dyn SigningIdentity>,
        options: &InitOptions,
    ) -> PushResult<Self::Session>;
}

/// Operations available on an initialized SDK session
#[async_trait]
pub trait PushSession: Send + Sync {
    /// Realtime stream handle
    type Stream: Send;

    /// List one page of inbox notifications
    async fn list_inbox(&self, query: &InboxQuery) -> PushResult<Response>;

    /// Send a chat message to `recipient`
    async fn send_chat(&self, recipient: &str, content: &ChatContent) -> PushResult<Response>;

    /// Fetch up to `limit` past messages exchanged with `recipient`
    async fn chat_history(&self, recipient: &str, limit: u32) -> PushResult<Response>;

    /// Subscribe the session's account to a channel
    async fn subscribe(&self, channel: &str) -> PushResult<Response>;

    /// Open a realtime stream delivering the given categories
    async fn init_stream(&self, categories: &[StreamCategory]) -> PushResult<Self::Stream>;
}
