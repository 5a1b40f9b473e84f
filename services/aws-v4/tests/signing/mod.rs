mod endpoint;
mod vectors;

use http::request::Parts;
use http::{header, Request};
use kinesign_aws_v4::Credential;

/// Credential used by the AWS SigV4 test suite.
pub fn example_credential() -> Credential {
    let _ = env_logger::builder().is_test(true).try_init();

    Credential::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
}

/// Build request parts with the test suite's fixed `x-amz-date`.
pub fn example_parts(method: &str, uri: &str) -> Parts {
    let mut parts = Request::builder()
        .method(method)
        .uri(uri)
        .body(())
        .expect("request must be valid")
        .into_parts()
        .0;
    parts.headers.insert(
        "x-amz-date",
        "20150830T123600Z".parse().expect("date must be valid"),
    );
    parts
}

pub fn authorization(parts: &Parts) -> &str {
    parts.headers[header::AUTHORIZATION]
        .to_str()
        .expect("authorization must be valid")
}
