//! Command line interface and configuration of the updater.

pub mod cmd;
pub mod config;

pub use cmd::{Commands, UpdaterCli};
pub use config::{parse_config, ChainConfig, ObservabilityConfig, PairConfig, UpdaterConfig};
