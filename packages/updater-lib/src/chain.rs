//! Defines [`ChainHandle`] and the [`ChainQuery`] trait used to read chain state.

use std::{fmt, sync::Arc};

use ibc_proto::ibc::lightclients::tendermint::v1::ClientState;
use tendermint_proto::types::SignedHeader;

use crate::error::QueryError;

/// A public key as reported by the chain, before its algorithm is checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawPublicKey {
    /// The key algorithm name, e.g. `ed25519`.
    pub algorithm: String,
    /// The raw key bytes.
    pub data: Vec<u8>,
}

/// A validator record as returned by the validators endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawValidator {
    /// The validator address.
    pub address: Vec<u8>,
    /// The validator consensus key.
    pub pub_key: RawPublicKey,
    /// The validator voting power.
    pub voting_power: u64,
    /// The proposer priority, if the endpoint reports one.
    pub proposer_priority: Option<i64>,
}

/// The parts of a block the validator set reconstruction needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockInfo {
    /// The base64 encoded address of the block proposer.
    pub proposer_address: String,
}

/// Read access to a chain, implemented by the RPC layer and by test doubles.
#[async_trait::async_trait]
pub trait ChainQuery: Send + Sync {
    /// Fetches the `07-tendermint` client state stored under `client_id`.
    /// Returns `None` if the chain has no client with that id.
    async fn client_state(&self, client_id: &str) -> Result<Option<ClientState>, QueryError>;

    /// Fetches the latest signed header.
    async fn latest_signed_header(&self) -> Result<SignedHeader, QueryError>;

    /// Fetches the block at `height`.
    async fn block_info(&self, height: u64) -> Result<BlockInfo, QueryError>;

    /// Fetches every validator active at `height`, in the order the chain returns them.
    async fn validators(&self, height: u64) -> Result<Vec<RawValidator>, QueryError>;
}

/// A chain endpoint together with the light client it hosts and the relayer's signer.
#[derive(Clone)]
pub struct ChainHandle {
    chain_id: String,
    client_id: String,
    query: Arc<dyn ChainQuery>,
    signer_address: String,
}

impl ChainHandle {
    /// Creates a new [`Self`].
    ///
    /// `client_id` names the light client hosted on this chain that tracks the
    /// counterparty.
    pub fn new(
        chain_id: impl Into<String>,
        client_id: impl Into<String>,
        query: Arc<dyn ChainQuery>,
        signer_address: impl Into<String>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            client_id: client_id.into(),
            query,
            signer_address: signer_address.into(),
        }
    }

    /// The chain id.
    #[must_use]
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// The id of the light client hosted on this chain.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The query handle.
    #[must_use]
    pub fn query(&self) -> &dyn ChainQuery {
        self.query.as_ref()
    }

    /// The address used as transaction signer on this chain.
    #[must_use]
    pub fn signer_address(&self) -> &str {
        &self.signer_address
    }
}

impl fmt::Debug for ChainHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainHandle")
            .field("chain_id", &self.chain_id)
            .field("client_id", &self.client_id)
            .field("signer_address", &self.signer_address)
            .finish_non_exhaustive()
    }
}
