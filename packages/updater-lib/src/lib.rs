#![doc = include_str!("../README.md")]
#![deny(clippy::nursery, clippy::pedantic, missing_docs)]

pub mod chain;
pub mod error;
pub mod height;
pub mod rpc;
pub mod update_client;
pub mod validator_set;

pub use chain::{BlockInfo, ChainHandle, ChainQuery, RawPublicKey, RawValidator};
pub use error::{ClientStateError, ConsistencyError, QueryError, UpdateClientError};
pub use height::{parse_revision_number, revision_height};
pub use rpc::TendermintRpcQuery;
pub use update_client::{build_update_client, UpdateClientResult};
pub use validator_set::{fetch_validator_set, KeyAlgorithm, PublicKey, Validator, ValidatorSet};
