//! API key handling for RubyGems-compatible registries.
//!
//! An [`Authorization`] bundles everything one command needs to decide which
//! registry it talks to and which key it presents there:
//!
//! * a [`CredentialStore`] backed by a KDL file of `name "key"` nodes,
//! * a [`HostResolver`] that picks the registry host,
//! * an optional key name the user selected explicitly.
//!
//! It also drives the interactive sign-in exchange through a [`Ui`], and
//! hands out authorized [`garnet_client::GarnetClient`]s once the push-host
//! allow-list has been checked.

mod authorization;
mod credentials;
mod error;
mod host;
mod key;
mod push_host;
mod sign_in;
mod ui;

pub use authorization::Authorization;
pub use credentials::{CredentialStore, DEFAULT_KEY_NAME};
pub use error::AccountError;
pub use host::{display_name, HostResolver, DEFAULT_HOST, HOST_ENV_VAR};
pub use key::KeyResolver;
pub use push_host::check_push_host;
pub use ui::{TermUi, Ui};
