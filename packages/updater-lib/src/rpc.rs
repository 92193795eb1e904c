//! [`ChainQuery`] implementation backed by a CometBFT RPC endpoint.

use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ibc_proto::ibc::{
    core::client::v1::{QueryClientStateRequest, QueryClientStateResponse},
    lightclients::tendermint::v1::ClientState,
};
use prost::{Message, Name};
use tendermint::block::Height as TmHeight;
use tendermint_proto::{
    crypto::{public_key::Sum, PublicKey as RawPublicKeyProto},
    types::SignedHeader,
};
use tendermint_rpc::{endpoint::abci_query::AbciQuery, Client, HttpClient, Paging, Url};

use crate::{
    chain::{BlockInfo, ChainQuery, RawPublicKey, RawValidator},
    error::QueryError,
};

/// The gRPC method path of the client state query.
pub const CLIENT_STATE_QUERY_PATH: &str = "/ibc.core.client.v1.Query/ClientState";

/// Queries a chain through its tendermint RPC endpoint.
#[derive(Clone, Debug)]
pub struct TendermintRpcQuery(HttpClient);

impl TendermintRpcQuery {
    /// Create a new [`Self`] instance.
    #[must_use]
    pub const fn new(tm_client: HttpClient) -> Self {
        Self(tm_client)
    }

    /// Create a new [`Self`] instance from an RPC url.
    ///
    /// # Errors
    /// Returns an error if the url is invalid.
    pub fn from_rpc_url(url: &str) -> Result<Self, QueryError> {
        let url = Url::from_str(url)?;
        Ok(Self::new(HttpClient::new(url)?))
    }

    /// Get the HTTP client for tendermint.
    #[must_use]
    pub const fn client(&self) -> &HttpClient {
        &self.0
    }
}

fn block_height(height: u64) -> Result<TmHeight, QueryError> {
    TmHeight::try_from(height).map_err(|_| QueryError::InvalidHeight(height))
}

fn raw_public_key(key: tendermint::PublicKey) -> Result<RawPublicKey, QueryError> {
    let (algorithm, data) = match RawPublicKeyProto::from(key).sum {
        Some(Sum::Ed25519(data)) => ("ed25519", data),
        Some(Sum::Secp256k1(data)) => ("secp256k1", data),
        None => return Err(QueryError::MissingField("validator.pub_key")),
    };

    Ok(RawPublicKey {
        algorithm: algorithm.to_string(),
        data,
    })
}

/// Interprets the response of a client state query. A "not found" error and an
/// empty response both mean the client does not exist.
fn decode_client_state(abci_resp: AbciQuery) -> Result<Option<ClientState>, QueryError> {
    if abci_resp.code.is_err() {
        if abci_resp.log.contains("not found") {
            return Ok(None);
        }
        return Err(QueryError::Abci {
            path: CLIENT_STATE_QUERY_PATH.to_string(),
            code: abci_resp.code.value(),
            log: abci_resp.log,
        });
    }

    let Some(any) = QueryClientStateResponse::decode(abci_resp.value.as_slice())?.client_state
    else {
        return Ok(None);
    };

    any.to_msg::<ClientState>().map(Some).map_err(|e| {
        if any.type_url == ClientState::type_url() {
            QueryError::Decode(e)
        } else {
            QueryError::UnexpectedType {
                expected: ClientState::type_url(),
                found: any.type_url.clone(),
            }
        }
    })
}

#[async_trait::async_trait]
impl ChainQuery for TendermintRpcQuery {
    async fn client_state(&self, client_id: &str) -> Result<Option<ClientState>, QueryError> {
        let abci_resp = self
            .client()
            .abci_query(
                Some(CLIENT_STATE_QUERY_PATH.to_string()),
                QueryClientStateRequest {
                    client_id: client_id.to_string(),
                }
                .encode_to_vec(),
                None,
                false,
            )
            .await?;

        decode_client_state(abci_resp)
    }

    async fn latest_signed_header(&self) -> Result<SignedHeader, QueryError> {
        let commit = self.client().latest_commit().await?;
        Ok(commit.signed_header.into())
    }

    async fn block_info(&self, height: u64) -> Result<BlockInfo, QueryError> {
        let block = self.client().block(block_height(height)?).await?.block;
        Ok(BlockInfo {
            proposer_address: STANDARD.encode(block.header.proposer_address.as_bytes()),
        })
    }

    async fn validators(&self, height: u64) -> Result<Vec<RawValidator>, QueryError> {
        let response = self
            .client()
            .validators(block_height(height)?, Paging::All)
            .await?;

        tracing::trace!(
            height,
            count = response.validators.len(),
            "Fetched validators"
        );

        response
            .validators
            .into_iter()
            .map(|info| {
                Ok(RawValidator {
                    address: info.address.as_bytes().to_vec(),
                    pub_key: raw_public_key(info.pub_key)?,
                    voting_power: info.power.value(),
                    proposer_priority: Some(info.proposer_priority.value()),
                })
            })
            .collect()
    }
}
