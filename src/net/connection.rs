//! Per-connection I/O deadlines.
//!
//! # Responsibilities
//! - Fail a write that makes no progress within the request timeout
//! - Pass reads straight through (header and body deadlines live elsewhere)
//!
//! # Design Decisions
//! - The deadline is armed when a write first returns `Pending` and cleared on
//!   any progress, so a slow but live reader is never cut off
//! - Expiry surfaces as `io::ErrorKind::TimedOut`, which makes hyper drop the
//!   connection

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::time::Sleep;

/// A stream whose writes fail once they stall for longer than a timeout.
#[derive(Debug)]
pub struct WriteDeadline<S> {
    inner: S,
    timeout: Option<Duration>,
    stalled: Option<Pin<Box<Sleep>>>,
}

impl<S> WriteDeadline<S> {
    /// Wrap `inner`. `None` disables the deadline.
    pub fn new(inner: S, timeout: Option<Duration>) -> Self {
        Self {
            inner,
            timeout,
            stalled: None,
        }
    }
}

impl<S: Unpin> WriteDeadline<S> {
    fn poll_guarded<T>(
        &mut self,
        cx: &mut Context<'_>,
        op: impl FnOnce(Pin<&mut S>, &mut Context<'_>) -> Poll<io::Result<T>>,
    ) -> Poll<io::Result<T>> {
        if let Poll::Ready(result) = op(Pin::new(&mut self.inner), cx) {
            self.stalled = None;
            return Poll::Ready(result);
        }

        let Some(timeout) = self.timeout else {
            return Poll::Pending;
        };
        let stalled = self
            .stalled
            .get_or_insert_with(|| Box::pin(tokio::time::sleep(timeout)));

        match stalled.as_mut().poll(cx) {
            Poll::Ready(()) => {
                self.stalled = None;
                Poll::Ready(Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("write stalled for {timeout:?}"),
                )))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<S: AsyncRead + Unpin> AsyncRead for WriteDeadline<S> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_read(cx, buf)
    }
}

impl<S: AsyncWrite + Unpin> AsyncWrite for WriteDeadline<S> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.get_mut()
            .poll_guarded(cx, |io, cx| io.poll_write(cx, buf))
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.get_mut().poll_guarded(cx, |io, cx| io.poll_flush(cx))
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.get_mut().poll_guarded(cx, |io, cx| io.poll_shutdown(cx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test(start_paused = true)]
    async fn test_stalled_write_times_out() {
        let (near, _far) = tokio::io::duplex(8);
        let mut stream = WriteDeadline::new(near, Some(Duration::from_secs(1)));

        let err = stream.write_all(&[b'x'; 64]).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[tokio::test(start_paused = true)]
    async fn test_draining_reader_keeps_writer_alive() {
        let (near, mut far) = tokio::io::duplex(8);
        let mut stream = WriteDeadline::new(near, Some(Duration::from_secs(1)));

        let reader = tokio::spawn(async move {
            let mut received = Vec::new();
            let mut chunk = [0u8; 8];
            while received.len() < 64 {
                tokio::time::sleep(Duration::from_millis(500)).await;
                let n = far.read(&mut chunk).await.unwrap();
                received.extend_from_slice(&chunk[..n]);
            }
            received
        });

        stream.write_all(&[b'y'; 64]).await.unwrap();
        assert_eq!(reader.await.unwrap(), vec![b'y'; 64]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_deadline_waits() {
        let (near, _far) = tokio::io::duplex(8);
        let mut stream = WriteDeadline::new(near, None);

        let pending = tokio::time::timeout(
            Duration::from_secs(3600),
            stream.write_all(&[b'z'; 64]),
        )
        .await;
        assert!(pending.is_err());
    }

    #[tokio::test]
    async fn test_reads_pass_through() {
        let (near, mut far) = tokio::io::duplex(64);
        let mut stream = WriteDeadline::new(near, Some(Duration::from_secs(1)));

        far.write_all(b"ping").await.unwrap();
        let mut buf = [0u8; 4];
        stream.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"ping");
    }
}
