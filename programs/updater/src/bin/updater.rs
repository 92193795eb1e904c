use clap::Parser;
use tm_client_updater::cli::{Commands, UpdaterCli, UpdaterConfig};
use tm_client_updater::observability::init_subscriber;
use tm_client_updater::updater;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = UpdaterCli::parse();
    match cli.command {
        Commands::Update(args) => {
            let config = UpdaterConfig::from_file(&args.config)?;

            init_subscriber(&config.observability)?;

            info!(
                "Observability initialized with level: {}",
                config.observability.level()
            );

            let pairs = config.selected_pairs(args.pair.as_deref())?;
            info!("Updating {} pair(s)", pairs.len());

            updater::run(&pairs, args.reverse).await
        }
    }
}
