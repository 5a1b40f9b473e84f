use super::{authorization, example_credential, example_parts};
use anyhow::Result;
use kinesign_aws_v4::{Credential, EndpointSigner, RequestSigner, UriEncoding};
use kinesign_core::{ErrorKind, SignRequest};

#[test]
fn test_endpoint_signer_scope() -> Result<()> {
    let mut parts = example_parts("POST", "https://kinesis.ap-northeast-1.amazonaws.com/");

    EndpointSigner::new().sign_request(&mut parts, b"{}", &example_credential())?;

    assert!(authorization(&parts).starts_with(
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/ap-northeast-1/kinesis/aws4_request, "
    ));
    Ok(())
}

#[test]
fn test_uri_encoding_matches_between_signers() -> Result<()> {
    let uri = "https://execute-api.us-east-1.amazonaws.com/prod/a%20b";
    let sign = |signer: &dyn SignRequest<Credential = Credential>| -> Result<String> {
        let mut parts = example_parts("GET", uri);
        signer.sign_request(&mut parts, b"", &example_credential())?;
        Ok(authorization(&parts).to_string())
    };

    let endpoint_single = sign(&EndpointSigner::new())?;
    let endpoint_double = sign(&EndpointSigner::new().with_uri_encoding(UriEncoding::Double))?;
    let region_double = sign(
        &RequestSigner::new("execute-api", "us-east-1").with_uri_encoding(UriEncoding::Double),
    )?;

    assert_ne!(endpoint_single, endpoint_double, "escaped path must sign differently");
    assert_eq!(endpoint_double, region_double);
    Ok(())
}

#[test]
fn test_endpoint_signer_rejects_unknown_host() {
    let mut parts = example_parts("POST", "http://127.0.0.1:4567/");

    let err = EndpointSigner::new()
        .sign_request(&mut parts, b"{}", &example_credential())
        .expect_err("ip address is not an aws endpoint");

    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert!(parts.headers.get("authorization").is_none());
}

#[test]
fn test_empty_credential_is_rejected() {
    let mut parts = example_parts("POST", "https://kinesis.us-east-1.amazonaws.com/");

    for cred in [
        Credential::new("", "secret"),
        Credential::new("AKIDEXAMPLE", ""),
        Credential::default().with_session_token("token"),
    ] {
        let err = RequestSigner::new("kinesis", "us-east-1")
            .sign_request(&mut parts, b"", &cred)
            .expect_err("empty credential must be rejected");
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }
    assert_eq!(parts.headers.len(), 1, "only x-amz-date must remain");
}
