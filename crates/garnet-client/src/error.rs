use miette::Diagnostic;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum GarnetClientError {
    #[error(transparent)]
    #[diagnostic(code(garnet_client::url_parse_error))]
    UrlParseError(#[from] url::ParseError),

    /// The registry URL can't have API paths appended to it, as happens with
    /// `mailto:` or `data:` URLs.
    #[error("{0} can't be used as a registry URL.")]
    #[diagnostic(
        code(garnet_client::invalid_registry_url),
        help("Registry hosts look like `https://rubygems.org`.")
    )]
    InvalidRegistryUrl(String),

    /// Something went wrong while talking to the registry, before it could
    /// answer.
    #[error("Request failed: {0}")]
    #[diagnostic(code(garnet_client::request_error))]
    RequestError(#[from] reqwest::Error),

    /// The registry answered, but not with the status we needed. `message`
    /// is the response body.
    #[error("Registry responded with {status}: {message}")]
    #[diagnostic(code(garnet_client::response_error))]
    ResponseError { status: StatusCode, message: String },

    #[error(transparent)]
    #[diagnostic(code(garnet_client::invalid_header_value))]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
}

impl GarnetClientError {
    pub(crate) async fn from_response(response: reqwest::Response) -> Result<Self, Self> {
        let status = response.status();
        let message = response.text().await?;
        Ok(Self::ResponseError { status, message })
    }
}
