use crate::Result;
use bytes::Bytes;
use std::fmt::Debug;

/// HttpSend is the transport a [`SigningClient`](crate::SigningClient)
/// delegates signed requests to.
///
/// Implementations must report transport level failures (connection refused,
/// timeout, TLS) as [`ErrorKind::Transport`](crate::ErrorKind::Transport).
/// HTTP error statuses are not errors, they are returned as a normal response.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}
