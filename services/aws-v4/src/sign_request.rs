use crate::constants::{
    AWS4_HMAC_SHA256, AWS4_REQUEST, AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET,
    X_AMZ_CONTENT_SHA_256, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN, X_AMZN_TRACE_ID,
};
use crate::Credential;
use http::header::HeaderName;
use http::request::Parts;
use http::{header, HeaderValue};
use kinesign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use kinesign_core::time::{format_date, format_iso8601, now, parse_iso8601, parse_rfc2822, DateTime};
use kinesign_core::{Error, Result, SignRequest, SigningCredential, SigningRequest};
use log::debug;
use percent_encoding::utf8_percent_encode;
use std::fmt::Write;

/// Headers that are always signed when present.
const MINIMAL_SIGNED_HEADERS: [&str; 4] = [
    "host",
    X_AMZ_DATE,
    X_AMZ_SECURITY_TOKEN,
    X_AMZ_CONTENT_SHA_256,
];

/// Headers that are never signed, proxies and clients are free to rewrite them.
const UNSIGNED_HEADERS: [&str; 5] = [
    "authorization",
    "user-agent",
    X_AMZN_TRACE_ID,
    "expect",
    "transfer-encoding",
];

/// SignedHeaders is the policy deciding which headers take part in the
/// signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SignedHeaders {
    /// Sign `host`, `x-amz-date`, and `x-amz-security-token` or
    /// `x-amz-content-sha256` when present.
    #[default]
    Minimal,
    /// Sign every header on the request except `authorization`, `user-agent`,
    /// `x-amzn-trace-id`, `expect` and `transfer-encoding`.
    All,
    /// Sign the minimal set plus the given headers when present.
    Include(Vec<HeaderName>),
}

impl SignedHeaders {
    fn is_signed(&self, name: &str) -> bool {
        match self {
            SignedHeaders::Minimal => MINIMAL_SIGNED_HEADERS.contains(&name),
            SignedHeaders::All => !UNSIGNED_HEADERS.contains(&name),
            SignedHeaders::Include(names) => {
                MINIMAL_SIGNED_HEADERS.contains(&name) || names.iter().any(|v| v == name)
            }
        }
    }

    /// Sorted names of the headers to sign.
    fn select(&self, req: &SigningRequest) -> Vec<String> {
        let mut names: Vec<String> = req
            .header_name_to_vec_sorted()
            .into_iter()
            .filter(|name| self.is_signed(name))
            .map(|name| name.to_string())
            .collect();
        names.dedup();
        names
    }
}

/// UriEncoding decides how many times the path is percent-encoded in the
/// canonical request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UriEncoding {
    /// Encode the path once, as S3 expects.
    ///
    /// Paths made of unreserved characters only, like the `/` Kinesis uses,
    /// sign the same in both modes.
    #[default]
    Single,
    /// Encode the already encoded path again, as most other services expect.
    Double,
}

/// Construction time settings shared by all signers.
#[derive(Debug, Clone, Default)]
struct Settings {
    signed_headers: SignedHeaders,
    uri_encoding: UriEncoding,
}

/// RequestSigner that implement AWS SigV4 for a fixed service and region.
///
/// The path is encoded once by default, use [`RequestSigner::with_uri_encoding`]
/// for services that expect double encoding.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,
    settings: Settings,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer scoped to given service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),
            settings: Settings::default(),

            time: None,
        }
    }

    /// Set the policy deciding which headers are signed.
    pub fn with_signed_headers(mut self, signed_headers: SignedHeaders) -> Self {
        self.settings.signed_headers = signed_headers;
        self
    }

    /// Set how the path is encoded in the canonical request.
    pub fn with_uri_encoding(mut self, uri_encoding: UriEncoding) -> Self {
        self.settings.uri_encoding = uri_encoding;
        self
    }

    /// Service name this signer is scoped to.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Region this signer is scoped to.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(&self, req: &mut Parts, body: &[u8], cred: &Credential) -> Result<()> {
        sign_v4(
            &self.service,
            &self.region,
            &self.settings,
            self.time,
            req,
            body,
            cred,
        )
    }
}

/// EndpointSigner implements AWS SigV4 with the service and region taken
/// from the endpoint the request is sent to.
///
/// The host must look like `<service>.<region>.amazonaws.com`, for example
/// `kinesis.us-east-1.amazonaws.com`.
#[derive(Debug, Clone, Default)]
pub struct EndpointSigner {
    settings: Settings,
}

impl EndpointSigner {
    /// Create a new endpoint signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy deciding which headers are signed.
    pub fn with_signed_headers(mut self, signed_headers: SignedHeaders) -> Self {
        self.settings.signed_headers = signed_headers;
        self
    }

    /// Set how the path is encoded in the canonical request.
    pub fn with_uri_encoding(mut self, uri_encoding: UriEncoding) -> Self {
        self.settings.uri_encoding = uri_encoding;
        self
    }
}

impl SignRequest for EndpointSigner {
    type Credential = Credential;

    fn sign_request(&self, req: &mut Parts, body: &[u8], cred: &Credential) -> Result<()> {
        let host = req
            .uri
            .host()
            .ok_or_else(|| Error::request_invalid("request without host is invalid for signing"))?;
        let (service, region) = parse_endpoint(host)?;
        let (service, region) = (service.to_string(), region.to_string());

        sign_v4(
            &service,
            &region,
            &self.settings,
            None,
            req,
            body,
            cred,
        )
    }
}

/// Split `<service>.<region>.amazonaws.com` into service and region.
fn parse_endpoint(host: &str) -> Result<(&str, &str)> {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 4 || labels.iter().any(|v| v.is_empty()) {
        return Err(Error::request_invalid(format!(
            "invalid aws endpoint {host}, expect <service>.<region>.amazonaws.com"
        )));
    }

    Ok((labels[0], labels[1]))
}

fn sign_v4(
    service: &str,
    region: &str,
    settings: &Settings,
    time: Option<DateTime>,
    req: &mut Parts,
    body: &[u8],
    cred: &Credential,
) -> Result<()> {
    if !cred.is_valid() {
        return Err(Error::credential_invalid(
            "access key id and secret access key are required for signing",
        ));
    }

    let mut signed_req = SigningRequest::build(req)?;
    let now = signing_time(&signed_req, time)?;

    // canonicalize context
    canonicalize_header(&mut signed_req, cred, now)?;
    canonicalize_query(&mut signed_req);

    // build canonical request and string to sign.
    let signed_headers = settings.signed_headers.select(&signed_req);
    let creq = canonical_request_string(&signed_req, &signed_headers, settings.uri_encoding, body)?;
    debug!("calculated canonical request: {creq}");
    let encoded_req = hex_sha256(creq.as_bytes());

    // Scope: "20220313/<region>/<service>/aws4_request"
    let scope = format!("{}/{}/{}/{AWS4_REQUEST}", format_date(now), region, service);
    debug!("calculated scope: {scope}");

    // StringToSign:
    //
    // AWS4-HMAC-SHA256
    // 20220313T072004Z
    // 20220313/<region>/<service>/aws4_request
    // <hashed_canonical_request>
    let string_to_sign = {
        let mut f = String::new();
        writeln!(f, "{AWS4_HMAC_SHA256}")?;
        writeln!(f, "{}", format_iso8601(now))?;
        writeln!(f, "{}", &scope)?;
        write!(f, "{}", &encoded_req)?;
        f
    };
    debug!("calculated string to sign: {string_to_sign}");

    let signing_key = generate_signing_key(&cred.secret_access_key, now, region, service);
    let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

    let mut authorization = HeaderValue::from_str(&format!(
        "{AWS4_HMAC_SHA256} Credential={}/{}, SignedHeaders={}, Signature={}",
        cred.access_key_id,
        scope,
        signed_headers.join(";"),
        signature
    ))?;
    authorization.set_sensitive(true);

    signed_req
        .headers
        .insert(header::AUTHORIZATION, authorization);

    // Apply to the request.
    signed_req.apply(req)
}

/// Reuse the time the caller already put on the request, if any.
fn signing_time(req: &SigningRequest, time: Option<DateTime>) -> Result<DateTime> {
    if let Some(v) = req.headers.get(X_AMZ_DATE) {
        return parse_iso8601(v.to_str()?);
    }
    if let Some(v) = req.headers.get(header::DATE) {
        return parse_rfc2822(v.to_str()?);
    }

    Ok(time.unwrap_or_else(now))
}

fn canonical_request_string(
    ctx: &SigningRequest,
    signed_headers: &[String],
    uri_encoding: UriEncoding,
    body: &[u8],
) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", ctx.method)?;
    // Insert encoded path
    let path = ctx.path_percent_decoded()?;
    let path = utf8_percent_encode(&path, &AWS_URI_ENCODE_SET).to_string();
    match uri_encoding {
        UriEncoding::Single => writeln!(f, "{path}")?,
        UriEncoding::Double => writeln!(f, "{}", utf8_percent_encode(&path, &AWS_URI_ENCODE_SET))?,
    }
    // Insert query
    writeln!(
        f,
        "{}",
        SigningRequest::query_to_string(ctx.query.clone(), "=", "&")
    )?;
    // Insert signed headers
    for name in signed_headers {
        writeln!(f, "{}:{}", name, ctx.header_value_canonical(name)?)?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;
    // Insert payload hash
    match ctx.headers.get(X_AMZ_CONTENT_SHA_256) {
        Some(v) => write!(f, "{}", v.to_str()?)?,
        None => write!(f, "{}", hex_sha256(body))?,
    }

    Ok(f)
}

fn canonicalize_header(ctx: &mut SigningRequest, cred: &Credential, now: DateTime) -> Result<()> {
    // Insert HOST header if not present.
    if ctx.headers.get(header::HOST).is_none() {
        let host = HeaderValue::from_str(ctx.authority.as_str())?;
        ctx.headers.insert(header::HOST, host);
    }

    // Insert DATE header if not present.
    if ctx.headers.get(X_AMZ_DATE).is_none() {
        ctx.headers
            .insert(X_AMZ_DATE, HeaderValue::try_from(format_iso8601(now))?);
    }

    // Insert X_AMZ_SECURITY_TOKEN header if security token exists.
    if let Some(token) = &cred.session_token {
        let mut value = HeaderValue::from_str(token)?;
        // Keep the token out of debug output.
        value.set_sensitive(true);

        ctx.headers.insert(X_AMZ_SECURITY_TOKEN, value);
    }

    Ok(())
}

fn canonicalize_query(ctx: &mut SigningRequest) {
    ctx.query = ctx
        .query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect();
}

fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), AWS4_REQUEST.as_bytes())
}
