use std::path::PathBuf;

pub use clap::ArgMatches;
pub use config::Config as GarnetConfig;
use config::{Environment, File};
use miette::Result;

pub use error::GarnetConfigError;
use kdl_source::KdlFormat;

mod error;
mod kdl_source;

/// Implemented by commands that accept values from the config file as
/// fallbacks for flags the user did not pass explicitly.
pub trait GarnetConfigLayer {
    fn layer_config(&mut self, _matches: &ArgMatches, _config: &GarnetConfig) -> Result<()> {
        Ok(())
    }
}

pub struct GarnetConfigOptions {
    global: bool,
    env: bool,
    global_config_file: Option<PathBuf>,
}

impl Default for GarnetConfigOptions {
    fn default() -> Self {
        GarnetConfigOptions {
            global: true,
            env: true,
            global_config_file: None,
        }
    }
}

impl GarnetConfigOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    pub fn env(mut self, env: bool) -> Self {
        self.env = env;
        self
    }

    pub fn global_config_file(mut self, file: Option<PathBuf>) -> Self {
        self.global_config_file = file;
        self
    }

    pub fn load(self) -> Result<GarnetConfig> {
        let mut builder = GarnetConfig::builder();
        if self.global {
            if let Some(config_file) = self.global_config_file {
                let path = config_file.display().to_string();
                builder = builder.add_source(File::new(&path, KdlFormat).required(false));
            }
        }
        if self.env {
            builder = builder.add_source(Environment::with_prefix("garnet_config"));
        }
        Ok(builder.build().map_err(GarnetConfigError::ConfigError)?)
    }
}
