//! Defines the command line interface for the updater.
use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "tm-client-updater",
    version,
    about = "Builds update-client transactions for Tendermint light clients",
    long_about = "Queries the configured chain pairs and prints, for each pair, the hex encoded\ntransaction body that updates the destination light client to the source chain tip."
)]
/// The command line interface for the updater.
pub struct UpdaterCli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// The subcommands for the updater.
#[derive(Clone, Debug, Parser)]
pub enum Commands {
    /// Build update-client transactions for the configured pairs.
    Update(update::Args),
}

/// The arguments for the update subcommand.
pub mod update {
    use super::Parser;

    /// The arguments for the update subcommand.
    #[derive(Clone, Debug, Parser)]
    pub struct Args {
        /// The configuration file for the updater.
        #[clap(long)]
        pub config: String,
        /// Only update the pair with this name.
        #[clap(long)]
        pub pair: Option<String>,
        /// Update the source chain's client of each pair instead of the destination's.
        #[clap(long)]
        pub reverse: bool,
    }
}
