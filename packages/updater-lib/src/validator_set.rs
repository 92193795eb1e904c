//! Reconstructs the Tendermint validator set of a chain at a given height.

use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tendermint_proto::{
    crypto::{public_key::Sum, PublicKey as RawPublicKeyProto},
    types::{Validator as RawValidatorProto, ValidatorSet as RawValidatorSetProto},
};

use crate::{
    chain::{ChainHandle, RawPublicKey, RawValidator},
    error::{ConsistencyError, QueryError, UpdateClientError},
};

/// The signature algorithms a Tendermint validator key can use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAlgorithm {
    /// Ed25519 keys.
    Ed25519,
    /// Secp256k1 keys.
    Secp256k1,
}

impl KeyAlgorithm {
    /// Tags `data` with this algorithm.
    #[must_use]
    pub fn key(self, data: Vec<u8>) -> PublicKey {
        match self {
            Self::Ed25519 => PublicKey::Ed25519(data),
            Self::Secp256k1 => PublicKey::Secp256k1(data),
        }
    }
}

impl FromStr for KeyAlgorithm {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ed25519" | "tendermint/PubKeyEd25519" => Ok(Self::Ed25519),
            "secp256k1" | "tendermint/PubKeySecp256k1" => Ok(Self::Secp256k1),
            other => Err(QueryError::UnsupportedKeyAlgorithm(other.to_string())),
        }
    }
}

/// A validator consensus key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicKey {
    /// An ed25519 key.
    Ed25519(Vec<u8>),
    /// A secp256k1 key.
    Secp256k1(Vec<u8>),
}

impl TryFrom<RawPublicKey> for PublicKey {
    type Error = QueryError;

    fn try_from(raw: RawPublicKey) -> Result<Self, Self::Error> {
        Ok(raw.algorithm.parse::<KeyAlgorithm>()?.key(raw.data))
    }
}

impl From<PublicKey> for RawPublicKeyProto {
    fn from(key: PublicKey) -> Self {
        let sum = match key {
            PublicKey::Ed25519(data) => Sum::Ed25519(data),
            PublicKey::Secp256k1(data) => Sum::Secp256k1(data),
        };
        Self { sum: Some(sum) }
    }
}

/// A member of a [`ValidatorSet`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validator {
    /// The validator address.
    pub address: Vec<u8>,
    /// The validator consensus key.
    pub pub_key: PublicKey,
    /// The validator voting power.
    pub voting_power: u64,
    /// The proposer priority, only set when the chain reported one.
    pub proposer_priority: Option<i64>,
}

impl TryFrom<RawValidator> for Validator {
    type Error = QueryError;

    fn try_from(raw: RawValidator) -> Result<Self, Self::Error> {
        if i64::try_from(raw.voting_power).is_err() {
            return Err(QueryError::VotingPowerOutOfRange {
                address: hex::encode_upper(&raw.address),
                power: raw.voting_power,
            });
        }

        Ok(Self {
            pub_key: raw.pub_key.try_into()?,
            address: raw.address,
            voting_power: raw.voting_power,
            proposer_priority: raw.proposer_priority,
        })
    }
}

/// An ordered validator set with its proposer and total voting power.
///
/// The proposer is always a member of the set and the total always equals the
/// sum of the members' voting power.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorSet {
    validators: Vec<Validator>,
    proposer_index: usize,
    total_voting_power: u64,
}

impl ValidatorSet {
    /// Builds a set from `validators`, keeping their order, and designates the
    /// member whose base64 encoded address equals `proposer_address` as proposer.
    ///
    /// # Errors
    /// Returns an error if the set is empty, if no member or more than one
    /// member matches the proposer address, or if the total voting power does
    /// not fit in a signed 64-bit integer.
    pub fn with_proposer(
        validators: Vec<Validator>,
        proposer_address: &str,
        height: u64,
    ) -> Result<Self, ConsistencyError> {
        if validators.is_empty() {
            return Err(ConsistencyError::EmptyValidatorSet { height });
        }

        let total_voting_power = validators
            .iter()
            .try_fold(0_u64, |total, v| total.checked_add(v.voting_power))
            .filter(|total| i64::try_from(*total).is_ok())
            .ok_or(ConsistencyError::VotingPowerOverflow { height })?;

        let mut matches = validators
            .iter()
            .enumerate()
            .filter(|(_, v)| STANDARD.encode(&v.address) == proposer_address)
            .map(|(i, _)| i);
        let proposer_index = matches
            .next()
            .ok_or_else(|| ConsistencyError::ProposerNotFound {
                height,
                proposer: proposer_address.to_string(),
            })?;
        if matches.next().is_some() {
            return Err(ConsistencyError::DuplicateProposer {
                height,
                proposer: proposer_address.to_string(),
            });
        }

        Ok(Self {
            validators,
            proposer_index,
            total_voting_power,
        })
    }

    /// The validators in query order.
    #[must_use]
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// The proposer of the block the set was fetched for.
    #[must_use]
    pub fn proposer(&self) -> &Validator {
        &self.validators[self.proposer_index]
    }

    /// The sum of the members' voting power.
    #[must_use]
    pub const fn total_voting_power(&self) -> u64 {
        self.total_voting_power
    }
}

// Bounded by the set total, which `with_proposer` keeps within i64.
fn wire_power(power: u64) -> i64 {
    i64::try_from(power).unwrap_or(i64::MAX)
}

impl From<Validator> for RawValidatorProto {
    fn from(validator: Validator) -> Self {
        Self {
            address: validator.address,
            pub_key: Some(validator.pub_key.into()),
            voting_power: wire_power(validator.voting_power),
            proposer_priority: validator.proposer_priority.unwrap_or_default(),
        }
    }
}

impl From<ValidatorSet> for RawValidatorSetProto {
    fn from(set: ValidatorSet) -> Self {
        let proposer = set.proposer().clone();
        Self {
            validators: set.validators.into_iter().map(Into::into).collect(),
            proposer: Some(proposer.into()),
            total_voting_power: wire_power(set.total_voting_power),
        }
    }
}

/// Fetches the validator set of `chain` at `height`, including the proposer of
/// the block at that height.
///
/// # Errors
/// Returns an error if a query fails, if a validator key uses an unsupported
/// algorithm, or if the proposer of the block is not exactly one member of the
/// validator set.
#[tracing::instrument(skip(chain), fields(chain_id = %chain.chain_id()))]
pub async fn fetch_validator_set(
    chain: &ChainHandle,
    height: u64,
) -> Result<ValidatorSet, UpdateClientError> {
    let (block, raw_validators) = futures::try_join!(
        chain.query().block_info(height),
        chain.query().validators(height),
    )?;

    let validators = raw_validators
        .into_iter()
        .map(Validator::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let validator_set = ValidatorSet::with_proposer(validators, &block.proposer_address, height)?;

    tracing::debug!(
        validators = validator_set.validators().len(),
        total_voting_power = validator_set.total_voting_power(),
        proposer = %block.proposer_address,
        "Reconstructed validator set"
    );

    Ok(validator_set)
}
