use std::fmt::{self, Debug};
use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response};
use url::Url;

use crate::GarnetClientError;

/// Client for a single registry host. An API key, when attached, is sent
/// verbatim in the `Authorization` header of every API request.
#[derive(Clone)]
pub struct GarnetClient {
    pub(crate) registry: Arc<Url>,
    pub(crate) api_key: Option<Arc<str>>,
    pub(crate) client: Client,
}

impl GarnetClient {
    pub fn new(registry: Url) -> Self {
        Self {
            registry: Arc::new(registry),
            api_key: None,
            client: ClientBuilder::new()
                .user_agent(concat!("garnet/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to build HTTP client."),
        }
    }

    pub fn with_api_key(mut self, api_key: impl AsRef<str>) -> Self {
        self.api_key = Some(api_key.as_ref().into());
        self
    }

    pub fn registry(&self) -> &Url {
        &self.registry
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Appends `segments` to the registry URL, keeping any path prefix the
    /// registry is mounted under.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, GarnetClientError> {
        let mut url = (*self.registry).clone();
        url.path_segments_mut()
            .map_err(|_| GarnetClientError::InvalidRegistryUrl(self.registry.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn authorized(
        &self,
        method: Method,
        url: Url,
    ) -> Result<RequestBuilder, GarnetClientError> {
        let mut request = self.client.request(method, url);
        if let Some(api_key) = &self.api_key {
            let mut value = HeaderValue::from_str(api_key)?;
            value.set_sensitive(true);
            request = request.header(AUTHORIZATION, value);
        }
        Ok(request)
    }

    pub(crate) async fn text_for_success(
        response: Response,
    ) -> Result<String, GarnetClientError> {
        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            Err(GarnetClientError::from_response(response).await?)
        }
    }
}

impl Debug for GarnetClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GarnetClient")
            .field("registry", &self.registry.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}
