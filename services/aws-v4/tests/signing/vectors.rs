//! Vectors from the AWS Signature Version 4 test suite.

use super::{authorization, example_credential, example_parts};
use anyhow::Result;
use http::header;
use http::HeaderName;
use kinesign_aws_v4::{RequestSigner, SignedHeaders};
use kinesign_core::SignRequest;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case(
    "GET",
    "https://example.amazonaws.com/",
    "5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31";
    "get vanilla"
)]
#[test_case(
    "POST",
    "https://example.amazonaws.com/",
    "5da7c1a2acd57cee7505fc6676e4e544621c30862966e37dddb68e92efbe5d6b";
    "post vanilla"
)]
#[test_case(
    "GET",
    "https://example.amazonaws.com/?Param2=value2&Param1=value1",
    "b97d918cfa904a5beff61c982a1b6f458b799221646efd99d3219ec94cdf2500";
    "get vanilla query order key case"
)]
fn test_aws_test_suite(method: &str, uri: &str, signature: &str) -> Result<()> {
    let mut parts = example_parts(method, uri);

    RequestSigner::new("service", "us-east-1").sign_request(
        &mut parts,
        b"",
        &example_credential(),
    )?;

    assert_eq!(
        authorization(&parts),
        format!(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, \
             SignedHeaders=host;x-amz-date, Signature={signature}"
        )
    );
    assert_eq!(parts.headers[header::HOST], "example.amazonaws.com");
    Ok(())
}

/// The IAM `ListUsers` example from the SigV4 documentation.
#[test_case(SignedHeaders::All; "all headers")]
#[test_case(
    SignedHeaders::Include(vec![HeaderName::from_static("content-type")]);
    "include content type"
)]
fn test_iam_list_users(policy: SignedHeaders) -> Result<()> {
    let mut parts = example_parts(
        "GET",
        "https://iam.amazonaws.com/?Action=ListUsers&Version=2010-05-08",
    );
    parts.headers.insert(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded; charset=utf-8".parse()?,
    );

    RequestSigner::new("iam", "us-east-1")
        .with_signed_headers(policy)
        .sign_request(&mut parts, b"", &example_credential())?;

    assert_eq!(
        authorization(&parts),
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, \
         SignedHeaders=content-type;host;x-amz-date, \
         Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
    );
    Ok(())
}

#[test]
fn test_minimal_policy_ignores_unlisted_headers() -> Result<()> {
    let mut with_extra = example_parts("GET", "https://example.amazonaws.com/");
    with_extra
        .headers
        .insert(header::CONTENT_TYPE, "application/json".parse()?);
    with_extra.headers.insert(header::USER_AGENT, "kinesign".parse()?);

    RequestSigner::new("service", "us-east-1").sign_request(
        &mut with_extra,
        b"",
        &example_credential(),
    )?;

    // Same signature as the get vanilla vector.
    assert!(authorization(&with_extra).ends_with(
        "SignedHeaders=host;x-amz-date, \
         Signature=5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31"
    ));
    Ok(())
}
