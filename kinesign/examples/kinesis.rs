use anyhow::Result;
use bytes::Bytes;
use kinesign::aws::{region_client, Credential};
use kinesign::ReqwestHttpSend;
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
    let mut credential = Credential::new(
        &env::var("AWS_ACCESS_KEY_ID")?,
        &env::var("AWS_SECRET_ACCESS_KEY")?,
    );
    credential.session_token = env::var("AWS_SESSION_TOKEN").ok();

    // Shard iterators expire after five minutes, fail long before that.
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let client = region_client(credential, &region, "kinesis", ReqwestHttpSend::new(http_client));

    let req = http::Request::post(format!("https://kinesis.{region}.amazonaws.com/"))
        .header("content-type", "application/x-amz-json-1.1")
        .header("x-amz-target", "Kinesis_20131202.ListStreams")
        .body(Bytes::from_static(b"{}"))?;

    let resp = client.send(req).await?;
    println!("Response status: {}", resp.status());
    println!("{}", String::from_utf8_lossy(resp.body()));

    Ok(())
}
