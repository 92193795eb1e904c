//! Error types returned while building an update-client message.

use thiserror::Error;

/// Top level error for [`crate::build_update_client`] and
/// [`crate::fetch_validator_set`].
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum UpdateClientError {
    /// A chain query failed or returned data that does not fit the schema.
    #[error(transparent)]
    Query(#[from] QueryError),
    /// The destination chain has no usable client state.
    #[error(transparent)]
    ClientState(#[from] ClientStateError),
    /// The queried data is internally inconsistent.
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
    /// A message could not be packed into a protobuf `Any`.
    #[error("failed to encode message: {0}")]
    Encode(#[from] prost::EncodeError),
}

/// Errors raised by a [`crate::ChainQuery`] call or while validating its response.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum QueryError {
    /// The RPC transport failed.
    #[error("rpc request failed: {0}")]
    Rpc(#[from] tendermint_rpc::Error),
    /// A protobuf payload could not be decoded.
    #[error("failed to decode protobuf response: {0}")]
    Decode(#[from] prost::DecodeError),
    /// An ABCI query returned a non-zero code.
    #[error("abci query `{path}` failed with code {code}: {log}")]
    Abci {
        /// The ABCI query path.
        path: String,
        /// The returned ABCI code.
        code: u32,
        /// The log attached to the response.
        log: String,
    },
    /// A protobuf `Any` carried an unexpected type url.
    #[error("unexpected type url: expected `{expected}`, found `{found}`")]
    UnexpectedType {
        /// The type url that was expected.
        expected: String,
        /// The type url that was returned.
        found: String,
    },
    /// A required field was absent from the response.
    #[error("missing field `{0}` in response")]
    MissingField(&'static str),
    /// A height does not fit the block height range of the chain.
    #[error("height {0} is not a valid block height")]
    InvalidHeight(u64),
    /// The signed header carries a non-positive height.
    #[error("signed header has invalid height {0}")]
    InvalidHeaderHeight(i64),
    /// The validator public key uses an algorithm other than ed25519 or secp256k1.
    #[error("unsupported public key algorithm `{0}`")]
    UnsupportedKeyAlgorithm(String),
    /// A voting power does not fit the signed 64-bit range used on the wire.
    #[error("voting power {power} of validator {address} is out of range")]
    VotingPowerOutOfRange {
        /// The hex encoded validator address.
        address: String,
        /// The voting power reported for the validator.
        power: u64,
    },
}

/// Errors about the light client state stored on the destination chain.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum ClientStateError {
    /// No client state is stored for the client id.
    #[error("no client state found for `{client_id}`")]
    NotFound {
        /// The queried client id.
        client_id: String,
    },
    /// The client state has no latest height.
    #[error("client state of `{client_id}` has no latest height")]
    MissingLatestHeight {
        /// The queried client id.
        client_id: String,
    },
    /// The latest height is zero or has no successor.
    #[error("client state of `{client_id}` has unusable latest height {height}")]
    InvalidLatestHeight {
        /// The queried client id.
        client_id: String,
        /// The reported revision height.
        height: u64,
    },
}

/// Errors raised when query results contradict each other.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum ConsistencyError {
    /// The chain reported no validators at the height.
    #[error("empty validator set at height {height}")]
    EmptyValidatorSet {
        /// The queried height.
        height: u64,
    },
    /// The block proposer is not a member of the validator set.
    #[error("proposer {proposer} not found in validator set at height {height}")]
    ProposerNotFound {
        /// The queried height.
        height: u64,
        /// The base64 proposer address from the block header.
        proposer: String,
    },
    /// More than one validator carries the proposer address.
    #[error("proposer {proposer} appears more than once in validator set at height {height}")]
    DuplicateProposer {
        /// The queried height.
        height: u64,
        /// The base64 proposer address from the block header.
        proposer: String,
    },
    /// The summed voting power does not fit in the wire representation.
    #[error("total voting power overflows at height {height}")]
    VotingPowerOverflow {
        /// The queried height.
        height: u64,
    },
    /// The source chain tip is not above the height the client already trusts.
    #[error("latest source height {current} is not above trusted height {trusted}")]
    StaleHeader {
        /// The revision height trusted by the destination client.
        trusted: u64,
        /// The latest source revision height.
        current: u64,
    },
}
