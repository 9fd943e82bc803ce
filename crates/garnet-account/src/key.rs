use crate::{AccountError, CredentialStore, HostResolver, DEFAULT_KEY_NAME};

/// Picks the API key for an operation.
///
/// In order: the key the user named explicitly (which must exist), the key
/// stored under the resolved host's exact URL, then the default key. Finding
/// nothing is not an error here; callers that need a key decide that.
#[derive(Clone, Copy, Debug)]
pub struct KeyResolver<'a> {
    credentials: &'a CredentialStore,
    hosts: &'a HostResolver,
}

impl<'a> KeyResolver<'a> {
    pub fn new(credentials: &'a CredentialStore, hosts: &'a HostResolver) -> Self {
        Self { credentials, hosts }
    }

    pub fn resolve(&self, key_name: Option<&str>) -> Result<Option<String>, AccountError> {
        if let Some(name) = key_name {
            return self.verify_api_key(name).map(Some);
        }
        // Only the environment and configured default apply here, never a
        // host given to an individual command.
        if let Some(host) = self.hosts.resolve(None) {
            if let Some(key) = self.credentials.get(host)? {
                tracing::debug!("Using the API key stored for {host}");
                return Ok(Some(key));
            }
        }
        self.credentials.get(DEFAULT_KEY_NAME)
    }

    pub fn verify_api_key(&self, name: &str) -> Result<String, AccountError> {
        self.credentials
            .get(name)?
            .ok_or_else(|| AccountError::MissingApiKey(name.to_owned()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::DEFAULT_HOST;
    use pretty_assertions::assert_eq;
    use tempfile::{tempdir, TempDir};

    fn store(contents: &str) -> (TempDir, CredentialStore) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.kdl");
        std::fs::write(&path, contents).unwrap();
        (dir, CredentialStore::new(path))
    }

    #[test]
    fn default_key() -> Result<(), AccountError> {
        let (_dir, credentials) = store("rubygems_api_key \"KEY\"\n");
        let hosts = HostResolver::new(Some(DEFAULT_HOST.into()));
        assert_eq!(
            KeyResolver::new(&credentials, &hosts).resolve(None)?.as_deref(),
            Some("KEY")
        );
        Ok(())
    }

    #[test]
    fn alternate_key_alternate_host() -> Result<(), AccountError> {
        let (_dir, credentials) = store(
            "rubygems_api_key \"KEY\"\n\"http://rubygems.engineyard.com\" \"EYKEY\"\n",
        );
        let hosts = HostResolver::new(Some(DEFAULT_HOST.into()))
            .env_override(Some("http://rubygems.engineyard.com".into()));
        assert_eq!(
            KeyResolver::new(&credentials, &hosts).resolve(None)?.as_deref(),
            Some("EYKEY")
        );
        Ok(())
    }

    #[test]
    fn host_match_is_exact() -> Result<(), AccountError> {
        let (_dir, credentials) = store(
            "rubygems_api_key \"KEY\"\n\"https://rubygems.engineyard.com\" \"EYKEY\"\n",
        );
        let hosts = HostResolver::new(Some(DEFAULT_HOST.into()))
            .env_override(Some("http://rubygems.engineyard.com".into()));
        assert_eq!(
            KeyResolver::new(&credentials, &hosts).resolve(None)?.as_deref(),
            Some("KEY"),
            "a different scheme is a different host"
        );
        Ok(())
    }

    #[test]
    fn explicit_key_name() -> Result<(), AccountError> {
        let (_dir, credentials) = store("rubygems_api_key \"KEY\"\nother \"OTHER\"\n");
        let hosts = HostResolver::new(Some(DEFAULT_HOST.into()));
        assert_eq!(
            KeyResolver::new(&credentials, &hosts)
                .resolve(Some("other"))?
                .as_deref(),
            Some("OTHER")
        );
        Ok(())
    }

    #[test]
    fn missing_explicit_key_never_falls_back() {
        let (_dir, credentials) = store("rubygems_api_key \"KEY\"\n");
        let hosts = HostResolver::new(Some(DEFAULT_HOST.into()));
        let keys = KeyResolver::new(&credentials, &hosts);
        assert!(matches!(
            keys.resolve(Some("missing")),
            Err(AccountError::MissingApiKey(name)) if name == "missing"
        ));
        assert!(matches!(
            keys.verify_api_key("missing"),
            Err(AccountError::MissingApiKey(_))
        ));
    }

    #[test]
    fn no_key_at_all() -> Result<(), AccountError> {
        let (_dir, credentials) = store("");
        let hosts = HostResolver::new(None);
        assert_eq!(KeyResolver::new(&credentials, &hosts).resolve(None)?, None);
        Ok(())
    }
}
