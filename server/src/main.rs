use clap::Parser;

use handleliste_lib::{config::Config, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let config = Config::parse();
    logging::init_tracing();

    handleliste_lib::run(config).await
}
