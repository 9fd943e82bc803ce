use std::path::PathBuf;

use clap::{parser::ValueSource, ArgMatches, Args};
use directories::ProjectDirs;
use garnet_account::{Authorization, CredentialStore, HostResolver};
use garnet_config::{GarnetConfig, GarnetConfigLayer};
use miette::{IntoDiagnostic, Result};

use crate::error::GarnetError;

/// Global settings every command needs to pick a registry and an API key.
#[derive(Debug, Args)]
pub struct AuthArgs {
    #[arg(from_global)]
    pub credentials: Option<PathBuf>,

    #[arg(from_global)]
    pub default_host: String,

    #[arg(from_global)]
    pub disable_default_gem_server: bool,
}

impl AuthArgs {
    pub fn credentials_path(&self) -> Result<PathBuf, GarnetError> {
        self.credentials
            .clone()
            .or_else(|| {
                ProjectDirs::from("", "", "garnet")
                    .map(|d| d.config_dir().join("credentials.kdl"))
            })
            .ok_or(GarnetError::NoCredentialsPath)
    }

    pub fn host_resolver(&self) -> HostResolver {
        HostResolver::from_env(
            (!self.disable_default_gem_server).then(|| self.default_host.clone()),
        )
    }

    /// Builds the credential context for one command run. `key_name`, if
    /// given, selects a stored key by name.
    pub fn authorization(&self, key_name: Option<String>) -> Result<Authorization, GarnetError> {
        let credentials = CredentialStore::new(self.credentials_path()?);
        tracing::debug!("Using credentials at {}", credentials.path().display());
        Ok(Authorization::new(credentials, self.host_resolver()).key_name(key_name))
    }
}

fn from_command_line(matches: &ArgMatches, id: &str) -> bool {
    matches!(matches.value_source(id), Some(ValueSource::CommandLine))
}

impl GarnetConfigLayer for AuthArgs {
    fn layer_config(&mut self, matches: &ArgMatches, config: &GarnetConfig) -> Result<()> {
        if !from_command_line(matches, "credentials") {
            if let Ok(path) = config.get_string("credentials") {
                self.credentials = Some(PathBuf::from(path));
            }
        }
        if !from_command_line(matches, "default_host") {
            if let Ok(host) = config.get_string("default_host") {
                self.default_host = host;
            }
        }
        if !from_command_line(matches, "disable_default_gem_server") {
            if let Ok(disable) = config.get_string("disable_default_gem_server") {
                self.disable_default_gem_server = disable.parse().into_diagnostic()?;
            }
        }
        Ok(())
    }
}
