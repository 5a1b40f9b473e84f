use anyhow::Result;
use bytes::Bytes;
use kinesign_core::HttpSend;
use kinesign_http_send_reqwest::ReqwestHttpSend;
use reqwest::Client;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::try_init();

    // Kinesis shard iterators expire after five minutes, so don't wait longer
    // than that for a response.
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .build()?;
    let http = ReqwestHttpSend::new(client);

    let req = http::Request::builder()
        .method("GET")
        .uri("https://httpbin.org/get")
        .header("X-Test-Header", "kinesign-example")
        .body(Bytes::new())?;

    match http.http_send(req).await {
        Ok(resp) => println!("Response status: {}", resp.status()),
        Err(e) => eprintln!("Request failed: {e}"),
    }

    Ok(())
}
