use async_trait::async_trait;
use clap::Args;
use garnet_account::TermUi;
use miette::Result;

use crate::auth_args::AuthArgs;
use crate::commands::GarnetCommand;

/// Sign in to a registry.
///
/// Does nothing if an API key already applies. With `--host`, the new key is
/// stored for that host only; otherwise it becomes the default key.
#[derive(Debug, Args)]
pub struct SigninCmd {
    /// Registry to sign in to.
    #[arg(long)]
    host: Option<String>,

    #[command(flatten)]
    pub(crate) auth_args: AuthArgs,
}

#[async_trait]
impl GarnetCommand for SigninCmd {
    async fn execute(self) -> Result<()> {
        let mut auth = self.auth_args.authorization(None)?;
        auth.sign_in(self.host.as_deref(), &mut TermUi).await?;
        Ok(())
    }
}
