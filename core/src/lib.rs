//! Core components for signing HTTP requests before sending them.
//!
//! This crate provides the foundational types and traits for kinesign.
//!
//! ## Overview
//!
//! - **Traits**: [`SigningCredential`] validates credentials, [`SignRequest`]
//!   signs a request in place and [`HttpSend`] sends it.
//! - **SigningClient**: holds a credential, a signer and a transport; its only
//!   job is "sign, then send".
//! - **SigningRequest**: a staged copy of the request that signers canonicalize
//!   and write back only once signing succeeded.
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use kinesign_core::{Error, HttpSend, Result, SignFn, SigningClient, SigningCredential};
//!
//! #[derive(Clone, Debug)]
//! struct Token(String);
//!
//! impl SigningCredential for Token {
//!     fn is_valid(&self) -> bool {
//!         !self.0.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyHttpSend;
//!
//! #[async_trait]
//! impl HttpSend for MyHttpSend {
//!     async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
//!         Err(Error::transport(format!("cannot reach {}", req.uri())))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = SignFn::new(|req: &mut http::request::Parts, _: &[u8], token: &Token| {
//!     req.headers.insert("x-token", token.0.parse()?);
//!     Ok(())
//! });
//! let client = SigningClient::new(Token("my-token".to_string()), signer, MyHttpSend);
//!
//! let req = http::Request::get("https://example.com").body(Bytes::new())?;
//! let resp = client.send(req).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod http;
pub use http::HttpSend;

mod api;
pub use api::{SignFn, SignRequest, SigningCredential};
mod request;
pub use request::SigningRequest;
mod client;
pub use client::SigningClient;
