//! Request logging middleware.
//! One INFO event per request, emitted once the response body has been
//! written out (or abandoned) and dropped.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use http_body::{Frame, SizeHint};

use crate::http::request::remote_addr;

pub async fn log_request(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let addr = remote_addr(request.extensions())
        .map(|addr| addr.to_string())
        .unwrap_or_default();

    let response = next.run(request).await;

    let record = RequestRecord {
        method,
        path,
        addr,
        status: response.status(),
        start,
    };
    response.map(|inner| {
        Body::new(LoggedBody {
            inner,
            record: Some(record),
        })
    })
}

struct RequestRecord {
    method: Method,
    path: String,
    addr: String,
    status: StatusCode,
    start: Instant,
}

impl RequestRecord {
    fn emit(self) {
        tracing::info!(
            method = %self.method,
            path = %self.path,
            addr = %self.addr,
            status = self.status.as_u16(),
            elapsed = ?self.start.elapsed(),
            "handled request"
        );
    }
}

/// Response body that logs its request when dropped.
struct LoggedBody {
    inner: Body,
    record: Option<RequestRecord>,
}

impl http_body::Body for LoggedBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Pin::new(&mut self.get_mut().inner).poll_frame(cx)
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl Drop for LoggedBody {
    fn drop(&mut self) {
        if let Some(record) = self.record.take() {
            record.emit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::{extract::ConnectInfo, middleware, routing::any, Router};
    use tower::ServiceExt;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn test_logs_once_body_is_done() {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app: Router = Router::new()
            .route("/{*path}", any(|| async { "ok" }))
            .layer(middleware::from_fn(log_request));

        let addr: SocketAddr = "10.1.2.3:4444".parse().unwrap();
        let mut request = Request::builder()
            .method("PATCH")
            .uri("/log/me?x=1")
            .body(Body::empty())
            .unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), 200);
        assert!(!capture.contents().contains("handled request"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, "ok");

        let logged = capture.contents();
        assert!(logged.contains("handled request"), "{logged}");
        assert!(logged.contains("method=PATCH"), "{logged}");
        assert!(logged.contains("path=/log/me"), "{logged}");
        assert!(logged.contains("addr=10.1.2.3:4444"), "{logged}");
        assert!(logged.contains("status=200"), "{logged}");
        assert!(logged.contains("elapsed="), "{logged}");
        assert_eq!(logged.matches("handled request").count(), 1, "{logged}");
    }
}
