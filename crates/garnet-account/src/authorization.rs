use garnet_client::{GarnetClient, GarnetClientError};
use url::Url;

use crate::{
    check_push_host, AccountError, CredentialStore, HostResolver, KeyResolver, Ui,
    DEFAULT_KEY_NAME,
};

/// Credentials and host settings for one command run.
#[derive(Debug)]
pub struct Authorization {
    pub(crate) credentials: CredentialStore,
    pub(crate) hosts: HostResolver,
    pub(crate) key_name: Option<String>,
}

impl Authorization {
    pub fn new(credentials: CredentialStore, hosts: HostResolver) -> Self {
        Self {
            credentials,
            hosts,
            key_name: None,
        }
    }

    /// Use the key stored under `name` instead of looking one up by host.
    pub fn key_name(mut self, name: Option<String>) -> Self {
        self.key_name = name;
        self
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn api_key(&self) -> Result<Option<String>, AccountError> {
        KeyResolver::new(&self.credentials, &self.hosts).resolve(self.key_name.as_deref())
    }

    pub fn verify_api_key(&self, name: &str) -> Result<String, AccountError> {
        KeyResolver::new(&self.credentials, &self.hosts).verify_api_key(name)
    }

    /// Forgets the key stored for `host`, or the default key if no host is
    /// given. Returns whether there was anything to forget.
    pub fn sign_out(&mut self, host: Option<&str>) -> Result<bool, AccountError> {
        let key_name = host.unwrap_or(DEFAULT_KEY_NAME);
        let removed = self.credentials.remove(key_name)?;
        if removed {
            tracing::info!("Removed the API key stored as {key_name}");
        }
        Ok(removed)
    }

    /// Resolves the host a mutating request would go to and checks it
    /// against the push-host allow-list.
    pub fn check_dispatch<'a>(
        &'a self,
        host: Option<&'a str>,
        allowed_push_hosts: &[String],
    ) -> Result<&'a str, AccountError> {
        let host = self.hosts.require(host)?;
        check_push_host(host, allowed_push_hosts)?;
        Ok(host)
    }

    /// Signs in if needed, then builds an authorized client.
    ///
    /// The push-host allow-list is checked first, so a refused host never
    /// sees the user's email and password either.
    pub async fn authorize<U: Ui>(
        &mut self,
        host: Option<&str>,
        allowed_push_hosts: &[String],
        ui: &mut U,
    ) -> Result<GarnetClient, AccountError> {
        self.check_dispatch(host, allowed_push_hosts)?;
        self.sign_in(host, ui).await?;
        self.authorized_client(host, allowed_push_hosts)
    }

    /// Builds a client for an authorized, mutating request.
    ///
    /// Every check happens before the client exists: the host must resolve,
    /// it must pass the push-host allow-list, and there must be a key to
    /// send.
    pub fn authorized_client(
        &self,
        host: Option<&str>,
        allowed_push_hosts: &[String],
    ) -> Result<GarnetClient, AccountError> {
        let host = self.check_dispatch(host, allowed_push_hosts)?;
        let api_key = self
            .api_key()?
            .ok_or_else(|| AccountError::NotSignedIn(host.to_owned()))?;
        let registry: Url = host.parse().map_err(GarnetClientError::from)?;
        tracing::debug!("Sending authorized requests to {registry}");
        Ok(GarnetClient::new(registry).with_api_key(api_key))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ui::test_ui::ScriptedUi;
    use crate::DEFAULT_HOST;
    use pretty_assertions::assert_eq;
    use tempfile::{tempdir, TempDir};
    use wiremock::matchers::any;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn authorization(contents: &str, hosts: HostResolver) -> (TempDir, Authorization) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.kdl");
        std::fs::write(&path, contents).unwrap();
        (dir, Authorization::new(CredentialStore::new(path), hosts))
    }

    #[async_std::test]
    async fn disallowed_push_host_sends_nothing() -> Result<(), AccountError> {
        let mock_server = MockServer::start().await;
        let _guard = Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount_as_scoped(&mock_server)
            .await;

        let (_dir, auth) = authorization(
            "rubygems_api_key \"KEY\"\n",
            HostResolver::new(Some(DEFAULT_HOST.into())),
        );
        let host = mock_server.uri();
        let push_host = "https://privategemserver.example".to_owned();

        let err = auth
            .authorized_client(Some(host.as_str()), &[push_host.clone()])
            .unwrap_err();
        assert!(matches!(err, AccountError::PushHostNotAllowed { .. }));
        let message = err.to_string();
        assert!(message.contains(&host));
        assert!(message.contains(&push_host));
        Ok(())
    }

    #[async_std::test]
    async fn disallowed_push_host_skips_sign_in() -> Result<(), AccountError> {
        let mock_server = MockServer::start().await;
        let _guard = Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_string("NEWKEY"))
            .expect(0)
            .mount_as_scoped(&mock_server)
            .await;

        let (_dir, mut auth) = authorization("", HostResolver::new(Some(DEFAULT_HOST.into())));
        let host = mock_server.uri();
        let mut ui = ScriptedUi::new(&["you@example.com", "secret"]);

        let result = auth
            .authorize(
                Some(host.as_str()),
                &["https://privategemserver.example".to_owned()],
                &mut ui,
            )
            .await;

        assert!(matches!(
            result,
            Err(AccountError::PushHostNotAllowed { .. })
        ));
        assert!(ui.prompts.is_empty());
        assert_eq!(ui.output, "");
        assert!(mock_server
            .received_requests()
            .await
            .unwrap_or_default()
            .is_empty());
        assert_eq!(auth.credentials().get(&host)?, None);
        Ok(())
    }

    #[async_std::test]
    async fn authorize_signs_in_then_sends_the_key() -> Result<(), AccountError> {
        use wiremock::matchers::{header, method, path};

        let mock_server = MockServer::start().await;
        let _sign_in = Mock::given(method("POST"))
            .and(path("/api/v1/api_key"))
            .respond_with(ResponseTemplate::new(200).set_body_string("NEWKEY"))
            .expect(1)
            .mount_as_scoped(&mock_server)
            .await;
        let _yank = Mock::given(method("DELETE"))
            .and(path("/api/v1/gems/yank"))
            .and(header("authorization", "NEWKEY"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Successfully deleted gem"))
            .expect(1)
            .mount_as_scoped(&mock_server)
            .await;

        let host = mock_server.uri();
        let (_dir, mut auth) = authorization(
            "",
            HostResolver::new(Some(DEFAULT_HOST.into())).env_override(Some(host.clone())),
        );
        let mut ui = ScriptedUi::new(&["you@example.com", "secret"]);

        let message = auth
            .authorize(None, &[host.clone()], &mut ui)
            .await?
            .yank("freebird", "1.0.1", None)
            .await?;

        assert_eq!(message, "Successfully deleted gem");
        assert!(ui.output.contains("Signed in."));
        assert_eq!(
            auth.credentials().get(DEFAULT_KEY_NAME)?.as_deref(),
            Some("NEWKEY")
        );
        Ok(())
    }

    #[test]
    fn verify_api_key() -> Result<(), AccountError> {
        let (_dir, auth) = authorization(
            "rubygems_api_key \"KEY\"\nother \"OTHER\"\n",
            HostResolver::new(Some(DEFAULT_HOST.into())),
        );
        assert_eq!(auth.verify_api_key("other")?, "OTHER");
        assert!(matches!(
            auth.verify_api_key("missing"),
            Err(AccountError::MissingApiKey(name)) if name == "missing"
        ));
        Ok(())
    }

    #[test]
    fn missing_host() {
        let (_dir, auth) = authorization("rubygems_api_key \"KEY\"\n", HostResolver::new(None));
        assert!(matches!(
            auth.authorized_client(None, &[]),
            Err(AccountError::MissingHost)
        ));
    }

    #[test]
    fn missing_key() {
        use miette::Diagnostic;

        let (_dir, auth) = authorization("", HostResolver::new(Some(DEFAULT_HOST.into())));
        let err = auth.authorized_client(None, &[]).unwrap_err();
        assert!(matches!(&err, AccountError::NotSignedIn(host) if host == DEFAULT_HOST));
        let help = err.help().map(|help| help.to_string()).unwrap_or_default();
        assert!(help.contains("RUBYGEMS_HOST"), "{help}");
    }

    #[test]
    fn client_carries_resolved_key() -> Result<(), AccountError> {
        let (_dir, auth) = authorization(
            "rubygems_api_key \"KEY\"\nother \"OTHER\"\n",
            HostResolver::new(Some(DEFAULT_HOST.into())),
        );
        let client = auth.authorized_client(None, &[DEFAULT_HOST.to_owned()])?;
        assert_eq!(client.api_key(), Some("KEY"));
        assert_eq!(client.registry().as_str(), "https://rubygems.org/");

        let auth = auth.key_name(Some("other".into()));
        let client = auth.authorized_client(Some("http://example.com"), &[])?;
        assert_eq!(client.api_key(), Some("OTHER"));
        assert_eq!(client.registry().as_str(), "http://example.com/");
        Ok(())
    }

    #[async_std::test]
    async fn authorized_requests_send_the_key() -> Result<(), AccountError> {
        use wiremock::matchers::{header, method, path};

        let mock_server = MockServer::start().await;
        let _guard = Mock::given(method("DELETE"))
            .and(path("/api/v1/gems/yank"))
            .and(header("authorization", "HKEY"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Successfully deleted gem"))
            .expect(1)
            .mount_as_scoped(&mock_server)
            .await;

        let host = mock_server.uri();
        let (_dir, auth) = authorization(
            &format!("rubygems_api_key \"KEY\"\n\"{host}\" \"HKEY\"\n"),
            HostResolver::new(Some(DEFAULT_HOST.into())).env_override(Some(host.clone())),
        );
        let message = auth
            .authorized_client(None, &[host.clone()])?
            .yank("freebird", "1.0.1", None)
            .await?;
        assert_eq!(message, "Successfully deleted gem");
        Ok(())
    }

    #[test]
    fn sign_out() -> Result<(), AccountError> {
        let (_dir, mut auth) = authorization(
            "rubygems_api_key \"KEY\"\n\"http://example.com\" \"HKEY\"\n",
            HostResolver::new(Some(DEFAULT_HOST.into())),
        );
        assert!(auth.sign_out(Some("http://example.com"))?);
        assert_eq!(auth.credentials().get("http://example.com")?, None);
        assert_eq!(
            auth.credentials().get(DEFAULT_KEY_NAME)?.as_deref(),
            Some("KEY")
        );
        assert!(auth.sign_out(None)?);
        assert!(!auth.sign_out(None)?);
        assert_eq!(auth.api_key()?, None);
        Ok(())
    }
}
