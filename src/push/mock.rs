//! Mock Push SDK for Testing
//!
//! Provides MockPushSdk, MockSession and MockSigner so the facade can be
//! exercised without a real messaging network.

use super::stream::{EventSender, EventStream};
use super::traits::*;
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Call recorded by the mock SDK
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Initialize { account: Address, env: Env },
    ListInbox(InboxQuery),
    SendChat { recipient: String, content: ChatContent },
    ChatHistory { recipient: String, limit: u32 },
    Subscribe { channel: String },
    InitStream { categories: Vec<StreamCategory> },
}

/// Mock SDK for testing
///
/// Sessions created by `initialize` share state with the SDK, so calls made
/// through any session show up in `calls()`.
#[derive(Clone, Default)]
pub struct MockPushSdk {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    failures: HashMap<Operation, PushError>,
    responses: HashMap<Operation, Response>,
    streams: Vec<EventSender>,
    next_session_id: u64,
}

impl MockState {
    fn take_failure(&mut self, operation: Operation) -> PushResult<()> {
        match self.failures.remove(&operation) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn response(&self, operation: Operation) -> Response {
        self.responses
            .get(&operation)
            .cloned()
            .unwrap_or_else(|| json!({ "operation": operation.as_str() }))
    }
}

impl MockPushSdk {
    /// Create new mock SDK
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call for `operation` fail with `err`
    pub fn fail_next(&self, operation: Operation, err: PushError) {
        self.state.lock().unwrap().failures.insert(operation, err);
    }

    /// Return `response` for every subsequent call of `operation`
    pub fn respond_with(&self, operation: Operation, response: Response) {
        self.state
            .lock()
            .unwrap()
            .responses
            .insert(operation, response);
    }

    /// Get recorded calls for assertions
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of sessions handed out so far
    pub fn sessions_created(&self) -> u64 {
        self.state.lock().unwrap().next_session_id
    }

    /// Push an event to every open stream; closed streams are dropped.
    pub fn emit(&self, event: StreamEvent) {
        let mut state = self.state.lock().unwrap();
        state
            .streams
            .retain(|sender| sender.send(event.clone()).is_ok());
    }

    /// Clear all state
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        *state = MockState::default();
    }
}

#[async_trait]
impl PushSdk for MockPushSdk {
    type Session = MockSession;

    async fn initialize(
        &self,
        _identity: Arc<dyn SigningIdentity>,
        options: &InitOptions,
    ) -> PushResult<MockSession> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Initialize {
            account: options.account.clone(),
            env: options.env,
        });
        state.take_failure(Operation::Initialize)?;

        let id = state.next_session_id;
        state.next_session_id += 1;

        Ok(MockSession {
            id,
            account: options.account.clone(),
            env: options.env,
            state: Arc::clone(&self.state),
        })
    }
}

/// Session handed out by `MockPushSdk`
pub struct MockSession {
    id: u64,
    account: Address,
    env: Env,
    state: Arc<Mutex<MockState>>,
}

impl MockSession {
    /// Sequence number of this session (0 for the first one created)
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn account(&self) -> &Address {
        &self.account
    }

    pub fn env(&self) -> Env {
        self.env
    }

    fn record(&self, operation: Operation, call: Call) -> PushResult<Response> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state.take_failure(operation)?;
        Ok(state.response(operation))
    }
}

#[async_trait]
impl PushSession for MockSession {
    type Stream = EventStream;

    async fn list_inbox(&self, query: &InboxQuery) -> PushResult<Response> {
        self.record(Operation::GetNotifications, Call::ListInbox(*query))
    }

    async fn send_chat(&self, recipient: &str, content: &ChatContent) -> PushResult<Response> {
        self.record(
            Operation::SendMessage,
            Call::SendChat {
                recipient: recipient.to_string(),
                content: content.clone(),
            },
        )
    }

    async fn chat_history(&self, recipient: &str, limit: u32) -> PushResult<Response> {
        self.record(
            Operation::GetChatHistory,
            Call::ChatHistory {
                recipient: recipient.to_string(),
                limit,
            },
        )
    }

    async fn subscribe(&self, channel: &str) -> PushResult<Response> {
        self.record(
            Operation::SubscribeToChannel,
            Call::Subscribe {
                channel: channel.to_string(),
            },
        )
    }

    async fn init_stream(&self, categories: &[StreamCategory]) -> PushResult<EventStream> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::InitStream {
            categories: categories.to_vec(),
        });
        state.take_failure(Operation::CreateStream)?;

        let (stream, sender) = EventStream::new(categories);
        state.streams.push(sender);
        Ok(stream)
    }
}

/// Mock signing identity with a fixed address
pub struct MockSigner {
    address: Address,
    address_error: Option<PushError>,
}

impl MockSigner {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            address_error: None,
        }
    }

    /// Signer whose address derivation fails with `err`
    pub fn failing(address: Address, err: PushError) -> Self {
        Self {
            address,
            address_error: Some(err),
        }
    }
}

#[async_trait]
impl SigningIdentity for MockSigner {
    async fn address(&self) -> PushResult<Address> {
        match &self.address_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.address.clone()),
        }
    }

    /// Deterministic "signature": address bytes followed by the payload.
    async fn sign(&self, payload: &[u8]) -> PushResult<Vec<u8>> {
        let mut signature = self.address.to_bytes();
        signature.extend_from_slice(payload);
        Ok(signature)
    }
}
