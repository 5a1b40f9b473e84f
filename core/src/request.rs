use std::borrow::Cow;

use http::uri::Authority;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;

use crate::{Error, Result};

/// Signing context for request.
///
/// `SigningRequest` is a staged copy of everything a signer reads from the
/// request. Signers mutate the copy and only [`SigningRequest::apply`]
/// writes the headers back, so a failed signing never leaves a request
/// half-signed.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, as sent on the wire.
    pub path: String,
    /// HTTP query parameters, percent decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &http::request::Parts) -> Result<Self> {
        let authority = parts.uri.authority().cloned().ok_or_else(|| {
            Error::request_invalid("request without authority is invalid for signing")
        })?;

        let path = match parts.uri.path() {
            "" => "/".to_string(),
            v => v.to_string(),
        };

        Ok(SigningRequest {
            method: parts.method.clone(),
            authority,
            path,
            query: parts
                .uri
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),
            headers: parts.headers.clone(),
        })
    }

    /// Apply the signed headers back to http::request::Parts.
    ///
    /// Method and uri are never written back.
    pub fn apply(self, parts: &mut http::request::Parts) -> Result<()> {
        parts.headers = self.headers;
        Ok(())
    }

    /// Get the path percent decoded.
    pub fn path_percent_decoded(&self) -> Result<Cow<str>> {
        percent_encoding::percent_decode_str(&self.path)
            .decode_utf8()
            .map_err(|e| Error::request_invalid("request path is not valid utf-8").with_source(e))
    }

    /// Get the canonical value of a header.
    ///
    /// Every value of the header is trimmed with inner runs of spaces
    /// collapsed into one, and repeated values are joined by `,`.
    pub fn header_value_canonical(&self, key: &str) -> Result<String> {
        let mut s = String::new();
        for (idx, v) in self.headers.get_all(key).iter().enumerate() {
            if idx != 0 {
                s.push(',');
            }
            s.push_str(&Self::header_value_normalize(v)?);
        }

        Ok(s)
    }

    /// Normalize header value.
    pub fn header_value_normalize(v: &HeaderValue) -> Result<String> {
        let v = v.to_str()?;
        Ok(v.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    /// Get header names as sorted vector.
    pub fn header_name_to_vec_sorted(&self) -> Vec<&str> {
        let mut h = self
            .headers
            .keys()
            .map(|k| k.as_str())
            .collect::<Vec<&str>>();
        h.sort_unstable();

        h
    }

    /// Convert sorted query to string.
    ///
    /// ```shell
    /// [(a, b), (c, d)] => "a=b&c=d"
    /// ```
    pub fn query_to_string(mut query: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut s = String::with_capacity(16);

        query.sort();

        for (idx, (k, v)) in query.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(join);
            }

            s.push_str(&k);
            s.push_str(sep);
            s.push_str(&v);
        }

        s
    }
}
