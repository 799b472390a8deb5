//! Messaging SDK Facade Module
//!
//! Wraps an external decentralized messaging/notification SDK:
//! - `traits`: the SDK boundary and shared value types
//! - `facade`: initialization gate plus six forwarding operations
//! - `mock`: in-memory SDK for tests
//! - `stream`: realtime event stream handle

pub mod facade;
pub mod mock;
pub mod stream;
pub mod traits;

pub use facade::PushFacade;
pub use mock::{MockPushSdk, MockSession, MockSigner};
pub use stream::{EventSender, EventStream};
pub use traits::{
    Address, ChatContent, Env, InboxQuery, InitOptions, MessageType, Operation, PushError,
    PushResult, PushSdk, PushSession, Response, SigningIdentity, StreamCategory, StreamEvent,
};
