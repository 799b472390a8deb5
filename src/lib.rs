//! pushlink - facade over a decentralized messaging/notification SDK
//!
//! Forwards session setup, inbox reads, direct messages, chat history,
//! channel subscription and realtime streams to the SDK behind `PushSdk`,
//! adding an initialization check and uniform error logging.
//!
//! ```no_run
//! use std::sync::Arc;
//! use pushlink::push::{Address, MockPushSdk, MockSigner, PushFacade, PushResult};
//!
//! async fn demo() -> PushResult<()> {
//!     let mut facade = PushFacade::new(MockPushSdk::new());
//!     let me = Address::parse("0x00000000000000000000000000000000000a11ce")?;
//!     facade.initialize(Arc::new(MockSigner::new(me))).await?;
//!     let inbox = facade.get_notifications_default().await?;
//!     println!("{}", inbox);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod logging;
pub mod push;

pub use config::PushConfig;
pub use push::{PushError, PushFacade, PushResult};
