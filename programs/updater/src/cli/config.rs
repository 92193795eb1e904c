//! Defines the top level configuration for the updater.

use std::{fs, path::Path, str::FromStr, sync::Arc};

use anyhow::Context;
use tm_client_updater_lib::{ChainHandle, TendermintRpcQuery};
use tracing::Level;

/// The top level configuration for the updater.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[allow(clippy::module_name_repetitions)]
pub struct UpdaterConfig {
    /// The configuration for logging.
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// The chain pairs whose clients are updated.
    pub pairs: Vec<PairConfig>,
}

/// The logging configuration.
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
#[allow(clippy::module_name_repetitions)]
pub struct ObservabilityConfig {
    /// The log level, `info` if absent or unknown.
    #[serde(default)]
    pub level: String,
}

/// Two chains that host light clients of each other.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[allow(clippy::module_name_repetitions)]
pub struct PairConfig {
    /// The name of the pair, used to select it from the command line.
    pub name: String,
    /// The chain whose headers are relayed.
    pub src_chain: ChainConfig,
    /// The chain hosting the client that is updated.
    pub dst_chain: ChainConfig,
    /// Whether the pair is updated when no pair is named.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// A chain endpoint and the light client it hosts.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[allow(clippy::module_name_repetitions)]
pub struct ChainConfig {
    /// The chain id.
    pub chain_id: String,
    /// The id of the light client on this chain that tracks the other chain of the pair.
    pub client_id: String,
    /// The tendermint RPC endpoint.
    pub rpc_url: String,
    /// The address that signs update transactions on this chain.
    pub signer_address: String,
}

/// Returns true, used as a default value for boolean fields.
const fn default_true() -> bool {
    true
}

impl ObservabilityConfig {
    /// Returns the log level.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_str(&self.level).unwrap_or(Level::INFO)
    }
}

impl ChainConfig {
    /// Connects a [`ChainHandle`] to the configured RPC endpoint.
    ///
    /// # Errors
    /// Returns an error if the RPC url is invalid.
    pub fn chain_handle(&self) -> anyhow::Result<ChainHandle> {
        let query = TendermintRpcQuery::from_rpc_url(&self.rpc_url)
            .with_context(|| format!("invalid rpc url for chain {}", self.chain_id))?;

        Ok(ChainHandle::new(
            &self.chain_id,
            &self.client_id,
            Arc::new(query),
            &self.signer_address,
        ))
    }
}

impl UpdaterConfig {
    /// Load an [`UpdaterConfig`] from a JSON file on disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or does not match the schema.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        parse_config(&contents)
    }

    /// Returns the pairs to update: the pair called `name` if given, otherwise
    /// every enabled pair.
    ///
    /// # Errors
    /// Returns an error if no pair is called `name`.
    pub fn selected_pairs(&self, name: Option<&str>) -> anyhow::Result<Vec<&PairConfig>> {
        match name {
            Some(name) => self
                .pairs
                .iter()
                .find(|pair| pair.name == name)
                .map(|pair| vec![pair])
                .ok_or_else(|| anyhow::anyhow!("no pair named '{name}' in config")),
            None => Ok(self.pairs.iter().filter(|pair| pair.enabled).collect()),
        }
    }
}

/// Parse a JSON configuration into the target struct while producing
/// detailed path-aware error messages (e.g. `pairs[0].dst_chain.rpc_url`).
///
/// # Errors
/// Returns an [`anyhow::Error`] with the precise path and the original serde
/// error message.
pub fn parse_config<T>(json: &str) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let mut deserializer = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize::<_, T>(&mut deserializer)
        .map_err(|e| anyhow::anyhow!("config error at {}: {}", e.path(), e))
}
