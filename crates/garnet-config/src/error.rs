use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum GarnetConfigError {
    #[error(transparent)]
    #[diagnostic(code(garnet_config::config_error))]
    ConfigError(#[from] config::ConfigError),
}
