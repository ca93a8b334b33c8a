//! Atoms as `futures` streams.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::mpsc::{UnboundedReceiver, unbounded};
use futures::stream::{FusedStream, Stream, StreamExt};

use super::read_only::ReadOnlyAtom;
use super::subscription::Subscription;

/// The values of an atom as a stream: the current value first, then every
/// change.
///
/// Dropping the stream unsubscribes.
#[must_use = "streams do nothing unless polled"]
pub struct Changes<T> {
    receiver: UnboundedReceiver<T>,
    _subscription: Subscription,
}

impl<T: Clone + 'static> ReadOnlyAtom<T> {
    /// Returns a stream of this atom's values.
    ///
    /// Values are buffered until the stream is polled.
    ///
    /// # Example
    ///
    /// ```
    /// use atomlens::atom::Atom;
    /// use futures::executor::block_on;
    /// use futures::StreamExt;
    ///
    /// let atom = Atom::create(1);
    /// let changes = atom.changes();
    ///
    /// atom.set(2);
    /// atom.set(2);
    /// atom.set(3);
    ///
    /// let seen: Vec<i32> = block_on(changes.take(3).collect());
    /// assert_eq!(seen, [1, 2, 3]);
    /// ```
    pub fn changes(&self) -> Changes<T> {
        let (sender, receiver) = unbounded();
        let subscription = self.subscribe(move |value: &T| {
            // the receiver is gone only once `Changes` is dropped, which also unsubscribes
            let _ = sender.unbounded_send(value.clone());
        });
        Changes {
            receiver,
            _subscription: subscription,
        }
    }
}

impl<T> Stream for Changes<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<T>> {
        self.receiver.poll_next_unpin(context)
    }
}

impl<T> FusedStream for Changes<T> {
    fn is_terminated(&self) -> bool {
        self.receiver.is_terminated()
    }
}
