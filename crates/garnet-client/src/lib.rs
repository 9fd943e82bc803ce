mod api;
mod client;
mod error;

pub use client::GarnetClient;
pub use error::GarnetClientError;
pub use reqwest::StatusCode;
