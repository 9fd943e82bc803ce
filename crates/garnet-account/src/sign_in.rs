use garnet_client::{GarnetClient, GarnetClientError};
use url::Url;

use crate::{display_name, AccountError, Authorization, Ui, DEFAULT_KEY_NAME};

impl Authorization {
    /// Signs in to a registry and stores the API key it issues.
    ///
    /// Does nothing at all if a key already resolves, so a key the user set
    /// up on purpose is never replaced. `host` overrides the resolved host for
    /// this exchange only; when given, the new key is stored under it,
    /// otherwise it becomes the default key.
    ///
    /// A rejected sign-in writes the registry's message to the error channel
    /// and stores nothing.
    pub async fn sign_in<U: Ui>(
        &mut self,
        host: Option<&str>,
        ui: &mut U,
    ) -> Result<(), AccountError> {
        if self.api_key()?.is_some() {
            tracing::debug!("An API key is already configured; skipping sign-in.");
            return Ok(());
        }

        let sign_in_host = self.hosts.require(host)?.to_owned();
        let registry: Url = sign_in_host.parse().map_err(GarnetClientError::from)?;

        ui.info(&format!(
            "Enter your {} credentials.",
            display_name(&sign_in_host)
        ));
        ui.info(&format!(
            "Don't have an account yet? Create one at {}/sign_up",
            sign_in_host.trim_end_matches('/')
        ));
        let email = ui
            .prompt("Email:")
            .map_err(AccountError::ReadUserInputError)?;
        let password = ui
            .prompt_secret("Password:")
            .map_err(AccountError::ReadUserInputError)?;

        tracing::info!("Signing in to {sign_in_host}");
        match GarnetClient::new(registry)
            .create_api_key(&email, &password)
            .await
        {
            Ok(api_key) => {
                self.credentials
                    .set(host.unwrap_or(DEFAULT_KEY_NAME), &api_key)?;
                ui.info("Signed in.");
                Ok(())
            }
            Err(GarnetClientError::ResponseError { status, message }) => {
                tracing::debug!("{sign_in_host} refused to issue a key: {status}");
                ui.error(&message);
                Err(AccountError::AuthenticationFailed { host: sign_in_host })
            }
            Err(e) => Err(e.into()),
        }
    }
}
