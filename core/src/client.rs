use crate::{HttpSend, Result, SignRequest};
use bytes::Bytes;
use http::request::Parts;
use log::debug;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// SigningClient signs every request with its credential before handing it
/// to the transport.
///
/// The signer is chosen at construction as a type parameter, the transport is
/// any [`HttpSend`]. Cloning is cheap: clones share credential, signer and
/// transport, so a client can be used from many tasks at once.
pub struct SigningClient<S: SignRequest> {
    credential: Arc<S::Credential>,
    signer: Arc<S>,
    http: Arc<dyn HttpSend>,
}

impl<S: SignRequest> Clone for SigningClient<S> {
    fn clone(&self) -> Self {
        Self {
            credential: self.credential.clone(),
            signer: self.signer.clone(),
            http: self.http.clone(),
        }
    }
}

impl<S: SignRequest> Debug for SigningClient<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningClient")
            .field("credential", &self.credential)
            .field("signer", &self.signer)
            .field("http", &self.http)
            .finish()
    }
}

impl<S: SignRequest> SigningClient<S> {
    /// Create a new client.
    pub fn new(credential: S::Credential, signer: S, http: impl HttpSend) -> Self {
        Self {
            credential: Arc::new(credential),
            signer: Arc::new(signer),
            http: Arc::new(http),
        }
    }

    /// Replace the transport, for example with one configured with custom
    /// timeouts.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// The credential this client signs with.
    pub fn credential(&self) -> &S::Credential {
        &self.credential
    }

    /// The signer this client signs with.
    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Sign the request in place without sending it.
    ///
    /// The added headers stay on `req` after this call returns.
    pub fn sign(&self, req: &mut Parts, body: &[u8]) -> Result<()> {
        self.signer.sign_request(req, body, &self.credential)
    }

    /// Sign the request and send it with the transport.
    ///
    /// If signing fails the error is returned immediately and the transport is
    /// never called. Otherwise the transport's response or error is returned
    /// verbatim; HTTP error statuses are returned as responses.
    pub async fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (mut parts, body) = req.into_parts();
        self.sign(&mut parts, &body)?;

        debug!("sending signed request: {} {}", parts.method, parts.uri);
        self.http
            .http_send(http::Request::from_parts(parts, body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ErrorKind, SignFn, SigningCredential};
    use async_trait::async_trait;
    use http::header::AUTHORIZATION;
    use http::{HeaderValue, StatusCode};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct Key(String);

    impl SigningCredential for Key {
        fn is_valid(&self) -> bool {
            !self.0.is_empty()
        }
    }

    fn key_signer(
    ) -> SignFn<Key, impl Fn(&mut Parts, &[u8], &Key) -> Result<()> + Send + Sync + Unpin + 'static>
    {
        SignFn::new(|req: &mut Parts, body: &[u8], key: &Key| {
            if !key.is_valid() {
                return Err(Error::credential_invalid("key is empty"));
            }
            let value = format!("{}:{}:{}", key.0, req.uri.path(), body.len());
            req.headers.insert(AUTHORIZATION, HeaderValue::from_str(&value)?);
            Ok(())
        })
    }

    /// Echo the authorization header back as the response body.
    #[derive(Debug, Default)]
    struct EchoHttpSend {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl HttpSend for EchoHttpSend {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let auth = req
                .headers()
                .get(AUTHORIZATION)
                .map(|v| Bytes::copy_from_slice(v.as_bytes()))
                .unwrap_or_default();
            Ok(http::Response::builder()
                .status(StatusCode::FORBIDDEN)
                .body(auth)?)
        }
    }

    #[derive(Debug)]
    struct FailingHttpSend;

    #[async_trait]
    impl HttpSend for FailingHttpSend {
        async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            Err(Error::transport("connection refused"))
        }
    }

    fn request(path: &str, body: &'static str) -> http::Request<Bytes> {
        http::Request::post(format!("https://example.com{path}"))
            .body(Bytes::from_static(body.as_bytes()))
            .expect("request must be valid")
    }

    #[tokio::test]
    async fn test_send_passes_response_through() -> Result<()> {
        let http = EchoHttpSend::default();
        let calls = http.calls.clone();
        let client = SigningClient::new(Key("k".to_string()), key_signer(), http);

        let resp = client.send(request("/hello", "abc")).await?;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(resp.body().as_ref(), b"k:/hello:3");
        Ok(())
    }

    #[tokio::test]
    async fn test_send_fails_fast_on_signing_error() {
        let http = EchoHttpSend::default();
        let calls = http.calls.clone();
        let client = SigningClient::new(Key(String::new()), key_signer(), http);

        let err = client
            .send(request("/hello", ""))
            .await
            .expect_err("signing must fail");

        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert!(err.is_signing_error());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_send_returns_transport_error() {
        let client = SigningClient::new(Key("k".to_string()), key_signer(), FailingHttpSend);

        let err = client
            .send(request("/hello", ""))
            .await
            .expect_err("transport must fail");
        assert!(err.is_transport_error());
    }

    #[tokio::test]
    async fn test_with_http_send() -> Result<()> {
        let client = SigningClient::new(Key("k".to_string()), key_signer(), FailingHttpSend)
            .with_http_send(EchoHttpSend::default());

        let resp = client.send(request("/", "")).await?;
        assert_eq!(resp.body().as_ref(), b"k:/:0");
        Ok(())
    }

    #[test]
    fn test_clone_shares_credential_and_signer() {
        let client = SigningClient::new(Key("k".to_string()), key_signer(), FailingHttpSend);
        let cloned = client.clone();

        assert_eq!(cloned.credential().0, "k");
        assert!(std::ptr::eq(client.credential(), cloned.credential()));
        assert!(std::ptr::eq(client.signer(), cloned.signer()));
    }

    #[test]
    fn test_sign_is_visible_to_caller() -> Result<()> {
        let client = SigningClient::new(Key("k".to_string()), key_signer(), FailingHttpSend);
        let (mut parts, body) = request("/visible", "xy").into_parts();

        client.sign(&mut parts, &body)?;
        assert_eq!(parts.headers[AUTHORIZATION], "k:/visible:2");
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_send() -> Result<()> {
        let http = EchoHttpSend::default();
        let calls = http.calls.clone();
        let client = SigningClient::new(Key("k".to_string()), key_signer(), http);

        let mut handles = Vec::new();
        for i in 0..16 {
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                let resp = client.send(request(&format!("/{i}"), "body")).await?;
                Ok::<_, Error>((i, resp.into_body()))
            }));
        }

        for handle in handles {
            let (i, body) = handle.await.expect("task must not panic")?;
            assert_eq!(body, Bytes::from(format!("k:/{i}:4")));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 16);
        Ok(())
    }
}
