use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum AccountError {
    /// A key name was selected explicitly, but the credentials file has no
    /// entry by that name. This never falls back to the default key.
    #[error("No API key named `{0}` is configured.")]
    #[diagnostic(
        code(garnet_account::missing_api_key),
        url(docsrs),
        help("Add it to your credentials file, or drop `--key` to use the default key.")
    )]
    MissingApiKey(String),

    /// No registry host was given, `RUBYGEMS_HOST` is unset or empty, and the
    /// default gem server has been disabled.
    #[error("You must specify a gem server.")]
    #[diagnostic(
        code(garnet_account::missing_host),
        url(docsrs),
        help("Pass `--host <URL>`, set RUBYGEMS_HOST, or configure `default_host`.")
    )]
    MissingHost,

    /// The gem's metadata restricts which hosts it may be pushed to, and the
    /// target host isn't one of them.
    #[error("\"{host}\" is not allowed by the gemspec, which only allows {allowed}")]
    #[diagnostic(code(garnet_account::push_host_not_allowed), url(docsrs))]
    PushHostNotAllowed { host: String, allowed: String },

    /// The registry refused to issue an API key. Its explanation has already
    /// been written to the error channel.
    #[error("Failed to sign in to {host}.")]
    #[diagnostic(code(garnet_account::authentication_failed), url(docsrs))]
    AuthenticationFailed { host: String },

    /// An authorized request was about to be sent without any API key.
    #[error("You are not signed in to {0}.")]
    #[diagnostic(
        code(garnet_account::not_signed_in),
        url(docsrs),
        help(
            "Run `garnet signin` first. Keys are looked up by the RUBYGEMS_HOST environment variable, not by --host, so if you signed in with --host, set RUBYGEMS_HOST to that host instead of signing in again."
        )
    )]
    NotSignedIn(String),

    /// An error was thrown in GarnetClient.
    #[error(transparent)]
    #[diagnostic(code(garnet_account::client_error), url(docsrs))]
    ClientError(#[from] garnet_client::GarnetClientError),

    #[error("Failed to read credentials from {}.", .0.display())]
    #[diagnostic(code(garnet_account::credentials_read_error), url(docsrs))]
    CredentialsReadError(PathBuf, #[source] std::io::Error),

    #[error("Failed to write credentials to {}.", .0.display())]
    #[diagnostic(code(garnet_account::credentials_write_error), url(docsrs))]
    CredentialsWriteError(PathBuf, #[source] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(garnet_account::credentials_parse_error), url(docsrs))]
    CredentialsParseError(#[from] kdl::KdlError),

    /// Failed to read user input.
    #[error(transparent)]
    #[diagnostic(code(garnet_account::read_user_input_error), url(docsrs))]
    ReadUserInputError(std::io::Error),
}
