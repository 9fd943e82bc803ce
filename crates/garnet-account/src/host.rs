use crate::AccountError;

/// The canonical public registry.
pub const DEFAULT_HOST: &str = "https://rubygems.org";

/// Environment variable that overrides the configured default host. An empty
/// value counts as unset.
pub const HOST_ENV_VAR: &str = "RUBYGEMS_HOST";

/// Picks the registry host for an operation: an explicit host wins, then a
/// non-empty `RUBYGEMS_HOST`, then the configured default.
///
/// The environment is captured when the resolver is built, so resolution
/// itself never reads process state.
#[derive(Clone, Debug, Default)]
pub struct HostResolver {
    default_host: Option<String>,
    env_override: Option<String>,
}

impl HostResolver {
    /// `default_host` is `None` when the default gem server is disabled.
    pub fn new(default_host: Option<String>) -> Self {
        Self {
            default_host,
            env_override: None,
        }
    }

    pub fn from_env(default_host: Option<String>) -> Self {
        Self::new(default_host).env_override(std::env::var(HOST_ENV_VAR).ok())
    }

    pub fn env_override(mut self, value: Option<String>) -> Self {
        self.env_override = value;
        self
    }

    pub fn resolve<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit
            .or_else(|| self.env_override.as_deref().filter(|host| !host.is_empty()))
            .or(self.default_host.as_deref())
    }

    /// Like [`HostResolver::resolve`], for callers that can't go on without a
    /// host.
    pub fn require<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str, AccountError> {
        self.resolve(explicit).ok_or(AccountError::MissingHost)
    }
}

/// How a host is named when talking to the user.
pub fn display_name(host: &str) -> &str {
    if host == DEFAULT_HOST {
        "RubyGems.org"
    } else {
        host
    }
}
