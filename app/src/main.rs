#[tokio::main]
async fn main() -> anyhow::Result<()> {
    swapline_lib::run().await
}
