use std::path::PathBuf;

use async_trait::async_trait;
use clap::{ArgMatches, CommandFactory, FromArgMatches as _, Parser, Subcommand};
use directories::ProjectDirs;
use garnet_account::DEFAULT_HOST;
use garnet_config::{GarnetConfig, GarnetConfigLayer, GarnetConfigOptions};
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

use commands::{
    owner::OwnerCmd, signin::SigninCmd, signout::SignoutCmd, yank::YankCmd, GarnetCommand,
};

mod auth_args;
mod commands;
mod error;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Garnet {
    /// File to read configuration values from.
    #[arg(global = true, long)]
    config: Option<PathBuf>,

    /// File to read and store API keys in.
    #[arg(global = true, long)]
    credentials: Option<PathBuf>,

    /// Registry to use when no host is given and RUBYGEMS_HOST is unset or
    /// empty.
    #[arg(global = true, long, default_value = DEFAULT_HOST)]
    default_host: String,

    /// Never fall back to the default registry.
    #[arg(global = true, long)]
    disable_default_gem_server: bool,

    /// Log output level/directive. Supports plain loglevels (off, error,
    /// warn, info, debug, trace) as well as more advanced directives in the
    /// format `target[span{field=value}]=level`.
    #[arg(global = true, long, default_value = "warn")]
    loglevel: String,

    /// Disable all log output.
    #[arg(global = true, long, short)]
    quiet: bool,

    #[command(subcommand)]
    subcommand: GarnetCmd,
}

impl Garnet {
    fn setup_logging(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(
                EnvFilter::builder()
                    .with_default_directive(if self.quiet {
                        LevelFilter::OFF.into()
                    } else {
                        self.loglevel.parse().into_diagnostic()?
                    })
                    .from_env_lossy(),
            )
            .init();
        Ok(())
    }

    pub async fn load() -> Result<()> {
        let start = std::time::Instant::now();
        let matches = Garnet::command().get_matches();
        let mut garnet = Garnet::from_arg_matches(&matches).into_diagnostic()?;
        let cfg = GarnetConfigOptions::new()
            .global_config_file(garnet.config.clone().or_else(|| {
                ProjectDirs::from("", "", "garnet").map(|d| d.config_dir().join("garnet.kdl"))
            }))
            .load()?;
        garnet.layer_config(&matches, &cfg)?;
        garnet.setup_logging()?;
        garnet.execute().await?;
        tracing::debug!("Ran in {}s", start.elapsed().as_millis() as f32 / 1000.0);
        Ok(())
    }
}

#[derive(Debug, Subcommand)]
pub enum GarnetCmd {
    /// Sign in to a registry and store the API key it issues.
    Signin(SigninCmd),

    /// Forget a stored API key.
    Signout(SignoutCmd),

    /// Remove a published gem version from the index.
    Yank(YankCmd),

    /// Add or remove owners of a gem.
    Owner(OwnerCmd),
}

#[async_trait]
impl GarnetCommand for Garnet {
    async fn execute(self) -> Result<()> {
        tracing::debug!("Running command: {:#?}", self.subcommand);
        match self.subcommand {
            GarnetCmd::Signin(cmd) => cmd.execute().await,
            GarnetCmd::Signout(cmd) => cmd.execute().await,
            GarnetCmd::Yank(cmd) => cmd.execute().await,
            GarnetCmd::Owner(cmd) => cmd.execute().await,
        }
    }
}

impl GarnetConfigLayer for Garnet {
    fn layer_config(&mut self, args: &ArgMatches, conf: &GarnetConfig) -> Result<()> {
        let matches = args.subcommand().map(|(_, sub)| sub).unwrap_or(args);
        match self.subcommand {
            GarnetCmd::Signin(ref mut cmd) => cmd.auth_args.layer_config(matches, conf),
            GarnetCmd::Signout(ref mut cmd) => cmd.auth_args.layer_config(matches, conf),
            GarnetCmd::Yank(ref mut cmd) => cmd.auth_args.layer_config(matches, conf),
            GarnetCmd::Owner(ref mut cmd) => cmd.auth_args.layer_config(matches, conf),
        }
    }
}
