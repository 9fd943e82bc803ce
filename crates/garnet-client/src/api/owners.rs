use reqwest::Method;

use crate::{GarnetClient, GarnetClientError};

impl GarnetClient {
    pub async fn add_owner(&self, gem: &str, email: &str) -> Result<String, GarnetClientError> {
        self.change_owner(Method::POST, gem, email).await
    }

    pub async fn remove_owner(&self, gem: &str, email: &str) -> Result<String, GarnetClientError> {
        self.change_owner(Method::DELETE, gem, email).await
    }

    async fn change_owner(
        &self,
        method: Method,
        gem: &str,
        email: &str,
    ) -> Result<String, GarnetClientError> {
        let url = self.endpoint(&["api", "v1", "gems", gem, "owners"])?;
        let response = self
            .authorized(method, url)?
            .form(&[("email", email)])
            .send()
            .await?;
        Self::text_for_success(response).await
    }
}
