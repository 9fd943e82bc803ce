use async_trait::async_trait;
use clap::{ArgGroup, Args};
use garnet_account::{TermUi, Ui};
use miette::Result;

use crate::auth_args::AuthArgs;
use crate::commands::GarnetCommand;

/// Add or remove owners of a gem.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("change").required(true).multiple(true).args(["add", "remove"])))]
pub struct OwnerCmd {
    /// Name of the gem.
    gem: String,

    /// Email of an owner to add. Repeatable.
    #[arg(long, short)]
    add: Vec<String>,

    /// Email of an owner to remove. Repeatable.
    #[arg(long, short)]
    remove: Vec<String>,

    /// Registry the gem lives on.
    #[arg(long)]
    host: Option<String>,

    /// Name of the stored API key to use.
    #[arg(long, short)]
    key: Option<String>,

    /// Host the gem's metadata permits pushes to. Repeatable; requests are
    /// refused if the target host isn't one of them.
    #[arg(long = "allowed-push-host")]
    allowed_push_hosts: Vec<String>,

    #[command(flatten)]
    pub(crate) auth_args: AuthArgs,
}

#[async_trait]
impl GarnetCommand for OwnerCmd {
    async fn execute(self) -> Result<()> {
        let mut ui = TermUi;
        let mut auth = self.auth_args.authorization(self.key)?;
        let host = self.host.as_deref();
        let client = auth
            .authorize(host, &self.allowed_push_hosts, &mut ui)
            .await?;
        for email in &self.add {
            tracing::info!("Adding {email} as an owner of {}", self.gem);
            ui.info(&client.add_owner(&self.gem, email).await?);
        }
        for email in &self.remove {
            tracing::info!("Removing {email} from the owners of {}", self.gem);
            ui.info(&client.remove_owner(&self.gem, email).await?);
        }
        Ok(())
    }
}
