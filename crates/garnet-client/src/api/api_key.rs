use reqwest::StatusCode;

use crate::{GarnetClient, GarnetClientError};

impl GarnetClient {
    /// Exchanges an email and password for a new API key.
    ///
    /// Only a `200 OK` counts as success, in which case the raw response body
    /// is the key. Every other status is returned as
    /// [`GarnetClientError::ResponseError`] carrying the body untouched.
    pub async fn create_api_key(
        &self,
        email: &str,
        password: &str,
    ) -> Result<String, GarnetClientError> {
        let url = self.endpoint(&["api", "v1", "api_key"])?;
        tracing::debug!("Requesting a new API key from {url}");
        let response = self
            .client
            .post(url)
            .basic_auth(email, Some(password))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.text().await?),
            _ => Err(GarnetClientError::from_response(response).await?),
        }
    }
}
