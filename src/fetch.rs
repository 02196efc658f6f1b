use std::fmt;

use gloo::net::http::Request;

use artwall_core::{parse_image_list, parse_works, CatalogError, Work};

#[derive(Debug)]
pub(crate) enum FetchError {
    Network(String),
    Status { url: String, status: u16 },
    Decode(CatalogError),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(message) => write!(f, "network error: {message}"),
            FetchError::Status { url, status } => write!(f, "{url} answered {status}"),
            FetchError::Decode(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<CatalogError> for FetchError {
    fn from(err: CatalogError) -> Self {
        FetchError::Decode(err)
    }
}

impl From<gloo::net::Error> for FetchError {
    fn from(err: gloo::net::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

async fn get_ok(url: &str) -> Result<gloo::net::http::Response, FetchError> {
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    Ok(response)
}

pub(crate) async fn fetch_works(url: &str) -> Result<Vec<Work>, FetchError> {
    let body = get_ok(url).await?.text().await?;
    Ok(parse_works(&body)?)
}

pub(crate) async fn fetch_image_list(url: &str) -> Result<Vec<String>, FetchError> {
    let body = get_ok(url).await?.text().await?;
    Ok(parse_image_list(&body)?)
}

pub(crate) async fn fetch_bytes(url: &str) -> Result<(Vec<u8>, String), FetchError> {
    let response = get_ok(url).await?;
    let mime = response.headers().get("content-type").unwrap_or_default();
    let bytes = response.binary().await?;
    Ok((bytes, mime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test(async)]
    async fn error_status_is_reported_with_url() {
        match fetch_works("missing/works.json").await {
            Err(FetchError::Status { url, status }) => {
                assert_eq!(url, "missing/works.json");
                assert_eq!(status, 404);
            }
            other => panic!("expected a status error, got {:?}", other.map(|works| works.len())),
        }
    }

    #[wasm_bindgen_test(async)]
    async fn malformed_body_is_a_decode_error() {
        let result = fetch_image_list("data:application/json,%7B").await;
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
