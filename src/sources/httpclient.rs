use std::time::Duration;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use crate::errors::FetchError;

pub const ACCEPT_JSON: &str = "application/json";
pub const ACCEPT_IMAGE: &str = "image/*";

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>
}

impl HttpResponse {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

/// Blocking GET. Transport failures (timeout, DNS, refused) are returned as
/// `FetchError::Network`; any HTTP status is returned as a response.
pub trait HttpClient {
    fn get(&self, url: &str, accept: &str) -> Result<HttpResponse, FetchError>;
}

pub struct ReqwestClient {
    client: Client
}

impl ReqwestClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, accept: &str) -> Result<HttpResponse, FetchError> {
        let network = |e: reqwest::Error| FetchError::Network { url: url.to_string(), reason: e.to_string() };

        let response = self.client.get(url)
            .header(ACCEPT, accept)
            .send()
            .map_err(network)?;

        let status = response.status().as_u16();
        let body = response.bytes().map_err(network)?.to_vec();

        tracing::trace!(url, status, bytes = body.len(), "GET");
        Ok(HttpResponse { status, body })
    }
}

/// Turns a response into its body, classifying 404 and non-success statuses
pub fn expect_success(url: &str, response: HttpResponse) -> Result<Vec<u8>, FetchError> {
    match response.status {
        404 => Err(FetchError::NotFound { url: url.to_string() }),
        _ if response.is_success() => Ok(response.body),
        status => Err(FetchError::Status { url: url.to_string(), status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_success() {
        let ok = HttpResponse { status: 200, body: b"{}".to_vec() };
        assert_eq!(expect_success("u", ok).unwrap(), b"{}".to_vec());

        let missing = HttpResponse { status: 404, body: vec![] };
        assert!(matches!(expect_success("u", missing), Err(FetchError::NotFound { .. })));

        let busy = HttpResponse { status: 503, body: vec![] };
        assert!(matches!(expect_success("u", busy), Err(FetchError::Status { status: 503, .. })));
    }
}
