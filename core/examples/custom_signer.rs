use async_trait::async_trait;
use bytes::Bytes;
use http::request::Parts;
use kinesign_core::hash::{hex_hmac_sha256, hex_sha256};
use kinesign_core::time::{format_iso8601, now};
use kinesign_core::utils::Redact;
use kinesign_core::{Error, HttpSend, Result, SignRequest, SigningClient, SigningCredential};
use std::fmt::{Debug, Formatter};

// A custom credential type
#[derive(Clone)]
struct ApiKey {
    key: String,
    secret: String,
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("key", &Redact::from(&self.key))
            .field("secret", &Redact::from(&self.secret))
            .finish()
    }
}

impl SigningCredential for ApiKey {
    fn is_valid(&self) -> bool {
        !self.key.is_empty() && !self.secret.is_empty()
    }
}

/// Plain HMAC scheme keyed directly by the secret, no scope derivation.
#[derive(Debug)]
struct HmacSigner;

impl SignRequest for HmacSigner {
    type Credential = ApiKey;

    fn sign_request(&self, req: &mut Parts, body: &[u8], cred: &ApiKey) -> Result<()> {
        if !cred.is_valid() {
            return Err(Error::credential_invalid("api key and secret are required"));
        }

        let timestamp = format_iso8601(now());
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            req.method,
            req.uri.path(),
            timestamp,
            hex_sha256(body)
        );
        let signature = hex_hmac_sha256(cred.secret.as_bytes(), string_to_sign.as_bytes());

        // Build every value first so a failure leaves the headers untouched.
        let timestamp = timestamp.parse()?;
        let mut authorization =
            http::HeaderValue::from_str(&format!("HMAC {}:{}", cred.key, signature))?;
        authorization.set_sensitive(true);

        req.headers.insert("x-timestamp", timestamp);
        req.headers.insert(http::header::AUTHORIZATION, authorization);
        Ok(())
    }
}

// Print the request instead of sending it.
#[derive(Debug)]
struct PrintHttpSend;

#[async_trait]
impl HttpSend for PrintHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        println!("{} {}", req.method(), req.uri());
        for (name, value) in req.headers() {
            println!("  {name}: {value:?}");
        }
        Ok(http::Response::new(Bytes::new()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cred = ApiKey {
        key: "demo-api-key".to_string(),
        secret: "demo-api-secret".to_string(),
    };
    let client = SigningClient::new(cred, HmacSigner, PrintHttpSend);

    let req = http::Request::post("https://api.example.com/v1/records")
        .body(Bytes::from_static(b"{\"hello\":\"world\"}"))?;
    let resp = client.send(req).await?;
    println!("status: {}", resp.status());

    Ok(())
}
