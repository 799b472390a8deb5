//! Realtime event stream handle.
//!
//! Channel-backed `Stream` of `StreamEvent`s. Only events whose category the
//! stream was opened for are yielded; the stream ends once every sender is
//! dropped.

use crate::push::traits::{PushError, PushResult, StreamCategory, StreamEvent};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Realtime stream of notification and chat events.
pub struct EventStream {
    receiver: mpsc::UnboundedReceiver<StreamEvent>,
    categories: Vec<StreamCategory>,
}

impl EventStream {
    /// Open a stream for `categories`.
    pub fn new(categories: &[StreamCategory]) -> (Self, EventSender) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let stream = Self {
            receiver,
            categories: categories.to_vec(),
        };
        (stream, EventSender { sender })
    }

    /// Categories this stream delivers, in the order requested.
    pub fn categories(&self) -> &[StreamCategory] {
        &self.categories
    }
}

impl Stream for EventStream {
    type Item = StreamEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match self.receiver.poll_recv(cx) {
                Poll::Ready(Some(event)) if !self.categories.contains(&event.category) => continue,
                other => return other,
            }
        }
    }
}

/// Producer side of an `EventStream`.
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::UnboundedSender<StreamEvent>,
}

impl EventSender {
    pub fn send(&self, event: StreamEvent) -> PushResult<()> {
        self.sender
            .send(event)
            .map_err(|_| PushError::Stream("event stream closed".to_string()))
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
