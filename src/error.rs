use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum GarnetError {
    /// There's no platform configuration directory to keep credentials in,
    /// which usually means no home directory could be found.
    #[error("Couldn't figure out where to store credentials.")]
    #[diagnostic(
        code(garnet::no_credentials_path),
        url(docsrs),
        help("Pass `--credentials <PATH>`, or set `credentials` in your config file.")
    )]
    NoCredentialsPath,
}
