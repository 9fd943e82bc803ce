use reqwest::Method;

use crate::{GarnetClient, GarnetClientError};

impl GarnetClient {
    /// Removes a published version from the index. Returns the registry's
    /// confirmation message.
    pub async fn yank(
        &self,
        gem: &str,
        version: &str,
        platform: Option<&str>,
    ) -> Result<String, GarnetClientError> {
        let url = self.endpoint(&["api", "v1", "gems", "yank"])?;
        let mut form = vec![("gem_name", gem), ("version", version)];
        if let Some(platform) = platform {
            form.push(("platform", platform));
        }
        let response = self
            .authorized(Method::DELETE, url)?
            .form(&form)
            .send()
            .await?;
        Self::text_for_success(response).await
    }
}
