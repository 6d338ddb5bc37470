#[tokio::main]
async fn main() -> anyhow::Result<()> {
    currency_sense::run().await
}
