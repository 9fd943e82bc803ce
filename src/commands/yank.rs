use async_trait::async_trait;
use clap::Args;
use garnet_account::{TermUi, Ui};
use miette::Result;

use crate::auth_args::AuthArgs;
use crate::commands::GarnetCommand;

/// Remove a published gem version from the index.
#[derive(Debug, Args)]
pub struct YankCmd {
    /// Name of the gem.
    gem: String,

    /// Version to yank.
    gem_version: String,

    /// Platform of the version to yank.
    #[arg(long)]
    platform: Option<String>,

    /// Registry to yank from.
    #[arg(long)]
    host: Option<String>,

    /// Name of the stored API key to use.
    #[arg(long, short)]
    key: Option<String>,

    /// Host the gem's metadata permits pushes to. Repeatable; the request is
    /// refused if the target host isn't one of them.
    #[arg(long = "allowed-push-host")]
    allowed_push_hosts: Vec<String>,

    #[command(flatten)]
    pub(crate) auth_args: AuthArgs,
}

#[async_trait]
impl GarnetCommand for YankCmd {
    async fn execute(self) -> Result<()> {
        let mut ui = TermUi;
        let mut auth = self.auth_args.authorization(self.key)?;
        let host = self.host.as_deref();
        let client = auth
            .authorize(host, &self.allowed_push_hosts, &mut ui)
            .await?;
        tracing::info!(
            "Yanking {} {} from {}",
            self.gem,
            self.gem_version,
            client.registry()
        );
        let message = client
            .yank(&self.gem, &self.gem_version, self.platform.as_deref())
            .await?;
        ui.info(&message);
        Ok(())
    }
}
