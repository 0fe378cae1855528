use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use bingo_app::{BingoLibrary, cli, config::Config};
use bingo_persistence::{BingoRepository, SqliteStore, connection::connect_and_migrate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = cli::Cli::parse();
    let config = Config::from_env()?;

    // Initialize database connection and run migrations
    let db = connect_and_migrate(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;
    info!("Using database {}", config.database_url);

    let repo = BingoRepository::new(Arc::new(SqliteStore::new(db)));
    let library = BingoLibrary::with_id_attempts(repo, config.id_attempts);

    let mut rng = rand::rng();
    cli::run(cli, &config, &library, &mut rng).await
}
