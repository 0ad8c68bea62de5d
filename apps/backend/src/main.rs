#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kana_trainer_backend::run().await
}
