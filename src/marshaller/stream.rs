use std::{
    pin::Pin,
    task::{Context, Poll},
};

use futures::{
    Stream, StreamExt,
    channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded},
};

use crate::media_change::MediaChange;

/// Changes of the effective value of one element key.
///
/// Yields `Some(value)` when the key resolves to a new value and `None` when it stops
/// resolving to any value. The stream ends when the element is released.
#[derive(Debug)]
pub struct ValueStream<V> {
    receiver: UnboundedReceiver<Option<V>>,
}

impl<V> ValueStream<V> {
    pub(crate) fn channel() -> (UnboundedSender<Option<V>>, Self) {
        let (sender, receiver) = unbounded();
        (sender, Self { receiver })
    }

    /// A stream that has already ended.
    pub(crate) fn finished() -> Self {
        let (_, stream) = Self::channel();
        stream
    }
}

impl<V> Stream for ValueStream<V> {
    type Item = Option<V>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_next_unpin(cx)
    }
}

/// Media changes after print substitution, in the order they were dispatched.
#[derive(Debug)]
pub struct MediaChangeStream {
    receiver: UnboundedReceiver<MediaChange>,
}

impl MediaChangeStream {
    pub(crate) fn channel() -> (UnboundedSender<MediaChange>, Self) {
        let (sender, receiver) = unbounded();
        (sender, Self { receiver })
    }
}

impl Stream for MediaChangeStream {
    type Item = MediaChange;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_next_unpin(cx)
    }
}
