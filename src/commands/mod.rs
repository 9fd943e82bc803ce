use async_trait::async_trait;
use miette::Result;

pub mod owner;
pub mod signin;
pub mod signout;
pub mod yank;

#[async_trait]
pub trait GarnetCommand {
    async fn execute(self) -> Result<()>;
}
