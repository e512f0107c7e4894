use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    promptmart_lib::main().await
}
