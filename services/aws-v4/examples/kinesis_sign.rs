use anyhow::Result;
use kinesign_aws_v4::{Credential, EndpointSigner, SignedHeaders};
use kinesign_core::SignRequest;

fn main() -> Result<()> {
    env_logger::init();

    let cred = Credential::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY");

    // Sign the target header as well so it can't be swapped in flight.
    let signer = EndpointSigner::new()
        .with_signed_headers(SignedHeaders::Include(vec!["x-amz-target".parse()?]));

    let body = br#"{"StreamName":"example","ShardId":"shardId-000000000000","ShardIteratorType":"LATEST"}"#;
    let (mut parts, _) = http::Request::post("https://kinesis.us-east-1.amazonaws.com/")
        .header("content-type", "application/x-amz-json-1.1")
        .header("x-amz-target", "Kinesis_20131202.GetShardIterator")
        .body(())?
        .into_parts();

    signer.sign_request(&mut parts, body, &cred)?;

    for (name, value) in &parts.headers {
        println!("{name}: {value:?}");
    }
    Ok(())
}
