pub mod api_key;
pub mod owners;
pub mod yank;
