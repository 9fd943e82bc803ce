use garnet::Garnet;
use miette::Result;

#[async_std::main]
async fn main() -> Result<()> {
    Garnet::load().await
}
