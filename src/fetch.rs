use reqwest::StatusCode;
use tracing::{debug, info};

use crate::error::FetchError;

/// GET `url` and return the body as text, whatever its declared content type.
pub async fn fetch_page(url: &str, user_agent: &str) -> Result<String, FetchError> {
    let client = reqwest::Client::builder().user_agent(user_agent).build()?;

    info!("Fetching page: {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    check_status(status)?;

    let body = response.text().await?;
    debug!(status = status.as_u16(), bytes = body.len(), "Fetched page");
    Ok(body)
}

fn check_status(status: StatusCode) -> Result<(), FetchError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status(status.as_u16()))
    }
}
