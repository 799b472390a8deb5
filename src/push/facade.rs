//! Push client facade.
//!
//! `PushFacade` gates six forwarding operations behind a single
//! "initialized" precondition. Each call goes through `forward`, which logs
//! a failure once under the operation's label and hands the error back
//! unchanged. There are no retries and no timeouts.

use super::traits::*;
use crate::config::PushConfig;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Inbox page requested by `get_notifications`.
pub const FIRST_PAGE: u32 = 1;

/// Default number of notifications fetched.
pub const DEFAULT_NOTIFICATION_LIMIT: u32 = 20;

/// Default number of chat messages fetched.
pub const DEFAULT_CHAT_HISTORY_LIMIT: u32 = 50;

/// Categories requested by `create_stream`, in this order.
pub const STREAM_CATEGORIES: [StreamCategory; 2] =
    [StreamCategory::Notification, StreamCategory::Chat];

/// Facade over a messaging SDK session.
///
/// Constructed explicitly and passed to whoever needs it. `initialize` takes
/// `&mut self`, so a facade cannot be re-initialized while one of its
/// forwarding calls is still running.
pub struct PushFacade<S: PushSdk> {
    sdk: S,
    env: Env,
    notification_limit: u32,
    chat_history_limit: u32,
    session: Option<Arc<S::Session>>,
    identity: Option<Arc<dyn SigningIdentity>>,
}

/// Await `fut`, logging a failure once under `operation`.
async fn forward<T, Fut>(operation: Operation, fut: Fut) -> PushResult<T>
where
    Fut: Future<Output = PushResult<T>>,
{
    match fut.await {
        Ok(value) => Ok(value),
        Err(err) => {
            error!(operation = operation.as_str(), error = %err, "push operation failed");
            Err(err)
        }
    }
}

impl<S: PushSdk> PushFacade<S> {
    /// Create an uninitialized facade targeting the staging environment.
    pub fn new(sdk: S) -> Self {
        Self::with_config(sdk, &PushConfig::default())
    }

    /// Create an uninitialized facade using environment and default limits
    /// from `config`.
    pub fn with_config(sdk: S, config: &PushConfig) -> Self {
        Self {
            sdk,
            env: config.push.env,
            notification_limit: config.push.notification_limit,
            chat_history_limit: config.push.chat_history_limit,
            session: None,
            identity: None,
        }
    }

    /// Create a session for `identity`.
    ///
    /// Replaces any previous session and identity. On failure the previous
    /// pair is kept.
    pub async fn initialize(
        &mut self,
        identity: Arc<dyn SigningIdentity>,
    ) -> PushResult<Arc<S::Session>> {
        let env = self.env;
        let sdk = &self.sdk;

        let (account, session) = forward(Operation::Initialize, async {
            let account = identity.address().await?;
            let options = InitOptions {
                env,
                account: account.clone(),
            };
            let session = sdk.initialize(Arc::clone(&identity), &options).await?;
            Ok::<_, PushError>((account, session))
        })
        .await?;

        let session = Arc::new(session);
        let replaced = self.session.replace(Arc::clone(&session)).is_some();
        self.identity = Some(identity);

        info!(account = %account, env = %env, replaced, "push session initialized");
        Ok(session)
    }

    /// Fetch the first inbox page of up to `limit` notifications.
    pub async fn get_notifications(&self, limit: u32) -> PushResult<Response> {
        forward(Operation::GetNotifications, async {
            let session = self.require_session()?;
            let query = InboxQuery {
                page: FIRST_PAGE,
                limit,
            };
            debug!(operation = "get_notifications", limit, "forwarding");
            session.list_inbox(&query).await
        })
        .await
    }

    /// `get_notifications` with the configured default limit (20 unless
    /// overridden).
    pub async fn get_notifications_default(&self) -> PushResult<Response> {
        self.get_notifications(self.notification_limit).await
    }

    /// Send a text message to `recipient`.
    pub async fn send_message(&self, recipient: &str, message: &str) -> PushResult<Response> {
        forward(Operation::SendMessage, async {
            let session = self.require_session()?;
            let content = ChatContent::text(message);
            debug!(operation = "send_message", recipient, "forwarding");
            session.send_chat(recipient, &content).await
        })
        .await
    }

    /// Fetch up to `limit` past messages with `recipient`.
    pub async fn get_chat_history(&self, recipient: &str, limit: u32) -> PushResult<Response> {
        forward(Operation::GetChatHistory, async {
            let session = self.require_session()?;
            debug!(operation = "get_chat_history", recipient, limit, "forwarding");
            session.chat_history(recipient, limit).await
        })
        .await
    }

    /// `get_chat_history` with the configured default limit (50 unless
    /// overridden).
    pub async fn get_chat_history_default(&self, recipient: &str) -> PushResult<Response> {
        self.get_chat_history(recipient, self.chat_history_limit)
            .await
    }

    /// Subscribe the current account to `channel`.
    pub async fn subscribe_to_channel(&self, channel: &str) -> PushResult<Response> {
        forward(Operation::SubscribeToChannel, async {
            let session = self.require_session()?;
            debug!(operation = "subscribe_to_channel", channel, "forwarding");
            session.subscribe(channel).await
        })
        .await
    }

    /// Open a realtime stream for notification and chat events.
    pub async fn create_stream(&self) -> PushResult<<S::Session as PushSession>::Stream> {
        forward(Operation::CreateStream, async {
            let session = self.require_session()?;
            debug!(operation = "create_stream", "forwarding");
            session.init_stream(&STREAM_CATEGORIES).await
        })
        .await
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Current session handle, if initialized.
    pub fn session(&self) -> Option<Arc<S::Session>> {
        self.session.clone()
    }

    /// Identity the current session was created for.
    pub fn identity(&self) -> Option<&Arc<dyn SigningIdentity>> {
        self.identity.as_ref()
    }

    pub fn env(&self) -> Env {
        self.env
    }

    fn require_session(&self) -> PushResult<Arc<S::Session>> {
        self.session.clone().ok_or(PushError::NotInitialized)
    }
}
