//! In-memory chain used by the update client tests

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ibc_proto::ibc::{
    core::client::v1::Height,
    lightclients::tendermint::v1::ClientState,
};
use tendermint_proto::types::{Header as RawHeader, SignedHeader};
use tm_client_updater_lib::{BlockInfo, ChainHandle, ChainQuery, QueryError, RawPublicKey, RawValidator};

pub const SIGNER: &str = "cosmos1updater";

/// A chain whose state is fixed up front. Heights that were never registered
/// fail with [`QueryError::InvalidHeight`].
#[derive(Debug, Default)]
pub struct MockChain {
    pub client_state: Option<ClientState>,
    pub signed_header: SignedHeader,
    pub blocks: HashMap<u64, BlockInfo>,
    pub validators: HashMap<u64, Vec<RawValidator>>,
    /// Heights passed to `validators`, in call order.
    pub validator_queries: Mutex<Vec<u64>>,
}

impl MockChain {
    /// A source chain at `height` whose validator sets are registered at each of `set_heights`.
    pub fn source(chain_id: &str, height: i64, set_heights: &[u64]) -> Self {
        let mut chain = Self {
            signed_header: signed_header(chain_id, height),
            ..Default::default()
        };
        for h in set_heights {
            chain.register_set(*h, default_validators(), 2);
        }
        chain
    }

    /// A destination chain hosting a client that trusts `latest_height`.
    pub fn destination(latest_height: Option<u64>) -> Self {
        Self {
            client_state: Some(client_state(latest_height)),
            ..Default::default()
        }
    }

    /// Registers `validators` at `height`, with the validator seeded by `proposer` as proposer.
    pub fn register_set(&mut self, height: u64, validators: Vec<RawValidator>, proposer: u8) {
        self.blocks.insert(
            height,
            BlockInfo {
                proposer_address: address_b64(proposer),
            },
        );
        self.validators.insert(height, validators);
    }

    pub fn queried_heights(&self) -> Vec<u64> {
        let mut heights = self.validator_queries.lock().unwrap().clone();
        heights.sort_unstable();
        heights
    }
}

#[async_trait::async_trait]
impl ChainQuery for MockChain {
    async fn client_state(&self, _client_id: &str) -> Result<Option<ClientState>, QueryError> {
        Ok(self.client_state.clone())
    }

    async fn latest_signed_header(&self) -> Result<SignedHeader, QueryError> {
        Ok(self.signed_header.clone())
    }

    async fn block_info(&self, height: u64) -> Result<BlockInfo, QueryError> {
        self.blocks
            .get(&height)
            .cloned()
            .ok_or(QueryError::InvalidHeight(height))
    }

    async fn validators(&self, height: u64) -> Result<Vec<RawValidator>, QueryError> {
        self.validator_queries.lock().unwrap().push(height);
        self.validators
            .get(&height)
            .cloned()
            .ok_or(QueryError::InvalidHeight(height))
    }
}

pub fn handle(chain_id: &str, client_id: &str, chain: Arc<MockChain>) -> ChainHandle {
    ChainHandle::new(chain_id, client_id, chain, SIGNER)
}

pub fn signed_header(chain_id: &str, height: i64) -> SignedHeader {
    SignedHeader {
        header: Some(RawHeader {
            chain_id: chain_id.to_string(),
            height,
            ..Default::default()
        }),
        commit: None,
    }
}

pub fn client_state(latest_height: Option<u64>) -> ClientState {
    ClientState {
        chain_id: "test-1".to_string(),
        latest_height: latest_height.map(|revision_height| Height {
            revision_number: 1,
            revision_height,
        }),
        ..Default::default()
    }
}

pub fn raw_validator(seed: u8, voting_power: u64) -> RawValidator {
    RawValidator {
        address: vec![seed; 20],
        pub_key: RawPublicKey {
            algorithm: "ed25519".to_string(),
            data: vec![seed; 32],
        },
        voting_power,
        proposer_priority: Some(i64::from(seed) - 2),
    }
}

pub fn default_validators() -> Vec<RawValidator> {
    vec![raw_validator(1, 100), raw_validator(2, 250), raw_validator(3, 50)]
}

pub fn address_b64(seed: u8) -> String {
    STANDARD.encode([seed; 20])
}
