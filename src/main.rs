use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

pub mod config;
pub mod inventory;
pub mod migrate;
pub mod selector;
pub mod template;
pub mod writer;

#[derive(thiserror::Error, Debug)]
enum Error {
    #[error("Invalid configuration: {0}")]
    Config(#[from] config::Error),

    #[error(transparent)]
    Inventory(#[from] inventory::Error),

    #[error(transparent)]
    Migrate(#[from] migrate::Error),

    #[error(transparent)]
    Writer(#[from] writer::Error),
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Standard output is reserved for the generated modules.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn generate(config_path: &PathBuf) -> Result<(), Error> {
    let config = config::load(config_path)?;
    tracing::info!(
        inventory = %config.inventory_url,
        accounts = ?config.accounts_to_migrate,
        "generating account modules"
    );

    let prism = inventory::PrismClient::new(&config.inventory_url)?;
    let documents = migrate::run(&prism, &config).await?;
    writer::write(&documents, config.output_dir.as_deref())?;

    return Ok(());
}

#[tokio::main]
async fn main() {
    init_logging();

    let config_path = PathBuf::from("./config.yaml");
    if let Err(error) = generate(&config_path).await {
        tracing::error!("{}", error);
        std::process::exit(1);
    }
}
