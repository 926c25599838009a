//! Keep-alive body for slow completions.
//!
//! Writing a manifest can outlive client and proxy idle timeouts, so the
//! completion response starts streaming immediately: a whitespace byte goes
//! out on every heartbeat tick until the real work finishes, then the XML
//! document (success or error) follows. Receivers tolerate the padding
//! because leading whitespace before the XML root is insignificant.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use futures::Stream;
use tokio::time::{Instant, Interval, interval_at};

type BodyFuture = Pin<Box<dyn Future<Output = Vec<u8>> + Send>>;

/// A streaming response body that emits keep-alive bytes while a future is
/// still running, then the future's output.
pub struct KeepaliveBody {
    inner: BodyFuture,
    ticker: Interval,
    done: bool,
}

impl std::fmt::Debug for KeepaliveBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeepaliveBody")
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl KeepaliveBody {
    /// Wrap the given work. The first keep-alive byte is emitted one full
    /// `interval` after creation, never immediately.
    pub fn new<F>(work: F, interval: Duration) -> Self
    where
        F: Future<Output = Vec<u8>> + Send + 'static,
    {
        Self {
            inner: Box::pin(work),
            ticker: interval_at(Instant::now() + interval, interval),
            done: false,
        }
    }
}

impl Stream for KeepaliveBody {
    type Item = Bytes;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.done {
            return Poll::Ready(None);
        }

        // The payload takes priority over a pending tick.
        if let Poll::Ready(payload) = self.inner.as_mut().poll(cx) {
            self.done = true;
            return Poll::Ready(Some(Bytes::from(payload)));
        }

        match self.ticker.poll_tick(cx) {
            Poll::Ready(_) => Poll::Ready(Some(Bytes::from_static(b" "))),
            Poll::Pending => Poll::Pending,
        }
    }
}
