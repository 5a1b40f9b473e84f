//! AWS SigV4 signing for kinesign.
//!
//! Two signers are provided, both producing `AWS4-HMAC-SHA256` signatures:
//!
//! - [`RequestSigner`] is scoped to a fixed service and region.
//! - [`EndpointSigner`] reads service and region from the endpoint host,
//!   `kinesis.us-east-1.amazonaws.com` signs for `kinesis` in `us-east-1`.
//!
//! Which headers are signed is decided by [`SignedHeaders`], how the path is
//! encoded by [`UriEncoding`].
//!
//! ```
//! use kinesign_aws_v4::{Credential, RequestSigner};
//! use kinesign_core::SignRequest;
//!
//! # fn main() -> kinesign_core::Result<()> {
//! let cred = Credential::new("access_key_id", "secret_access_key");
//! let signer = RequestSigner::new("kinesis", "us-east-1");
//!
//! let (mut parts, body) = http::Request::post("https://kinesis.us-east-1.amazonaws.com/")
//!     .header("x-amz-target", "Kinesis_20131202.ListStreams")
//!     .body(b"{}".to_vec())?
//!     .into_parts();
//! signer.sign_request(&mut parts, &body, &cred)?;
//!
//! assert!(parts.headers.contains_key("authorization"));
//! assert!(parts.headers.contains_key("x-amz-date"));
//! # Ok(())
//! # }
//! ```

mod constants;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::EndpointSigner;
pub use sign_request::RequestSigner;
pub use sign_request::SignedHeaders;
pub use sign_request::UriEncoding;
