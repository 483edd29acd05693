use crate::StoreError;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

/// Send a request, parse the JSON response.
/// Throws error on non OK status code.
pub async fn send_json<R: DeserializeOwned>(request: RequestBuilder) -> Result<R, StoreError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        Ok(response.json::<R>().await?)
    } else {
        Err(StoreError::StatusCode(
            status,
            response.text().await.unwrap_or_default(),
        ))
    }
}

/// Take the single row of a `return=representation` response.
pub fn first_row<T>(rows: Vec<T>, provider: &'static str) -> Result<T, StoreError> {
    rows.into_iter().next().ok_or_else(|| {
        StoreError::Invariant(provider, "no row returned in representation".to_string())
    })
}
