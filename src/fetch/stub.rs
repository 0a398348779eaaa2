use async_trait::async_trait;
use reqwest::{Request, Response};

use super::HttpClient;

/// Answers every request with a fixed status and body.
pub(crate) struct StubClient {
    pub status: u16,
    pub body: &'static str,
}

#[async_trait]
impl HttpClient for StubClient {
    async fn execute(&self, _req: Request) -> reqwest::Result<Response> {
        let resp = http::Response::builder()
            .status(self.status)
            .body(self.body)
            .unwrap();
        Ok(resp.into())
    }
}
