use async_trait::async_trait;
use clap::Args;
use garnet_account::{TermUi, Ui};
use miette::Result;

use crate::auth_args::AuthArgs;
use crate::commands::GarnetCommand;

/// Forget a stored API key.
#[derive(Debug, Args)]
pub struct SignoutCmd {
    /// Forget the key stored for this host instead of the default key.
    #[arg(long)]
    host: Option<String>,

    #[command(flatten)]
    pub(crate) auth_args: AuthArgs,
}

#[async_trait]
impl GarnetCommand for SignoutCmd {
    async fn execute(self) -> Result<()> {
        let mut auth = self.auth_args.authorization(None)?;
        let mut ui = TermUi;
        if auth.sign_out(self.host.as_deref())? {
            ui.info("Signed out.");
        } else {
            ui.info("You are not signed in.");
        }
        Ok(())
    }
}
