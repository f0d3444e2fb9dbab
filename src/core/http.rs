use std::time::Duration;

use reqwest::{
    header::USER_AGENT,
    Client,
    Response,
};

use crate::core::MyoSimError;

pub fn http_client(timeout: Duration) -> Result<Client, MyoSimError> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(5)))
        .build()
        .map_err(|e| MyoSimError::Custom(format!("HTTP client build failed: {e}")))
}

pub async fn post_json<B: serde::Serialize + ?Sized>(
    client: &Client,
    url: &str,
    body: &B,
) -> Result<Response, MyoSimError> {
    let resp = client
        .post(url)
        .header(USER_AGENT, concat!("myosim/", env!("CARGO_PKG_VERSION")))
        .json(body)
        .send()
        .await?;

    ensure_success(&resp)?;
    Ok(resp)
}

fn ensure_success(resp: &Response) -> Result<(), MyoSimError> {
    if !resp.status().is_success() {
        return Err(MyoSimError::HttpStatus {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}

/// Joins a base service URL and an endpoint path with exactly one slash.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joining() {
        assert_eq!(endpoint("http://127.0.0.1:8000", "simulate"), "http://127.0.0.1:8000/simulate");
        assert_eq!(endpoint("http://127.0.0.1:8000/", "/predict"), "http://127.0.0.1:8000/predict");
    }
}
