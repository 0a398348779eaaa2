//! Remote retrieval of trip logs served over HTTP.

mod basic;
mod client;
#[cfg(test)]
pub(crate) mod stub;

pub use basic::BasicClient;
pub use client::HttpClient;

use crate::error::LoadError;

/// Downloads the body at `url`, rejecting non-success statuses.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>, LoadError> {
    let parsed = url
        .parse::<reqwest::Url>()
        .map_err(|_| LoadError::InvalidUrl(url.to_string()))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LoadError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(resp.bytes().await?.to_vec())
}
