//! Builds the `MsgUpdateClient` that moves a destination light client to the
//! latest height of its source chain.

use ibc_proto::{
    cosmos::tx::v1beta1::TxBody,
    google::protobuf::Any,
    ibc::{
        core::client::v1::{Height, MsgUpdateClient},
        lightclients::tendermint::v1::Header,
    },
};
use prost::Message;

use crate::{
    chain::ChainHandle,
    error::{ClientStateError, ConsistencyError, QueryError, UpdateClientError},
    height::revision_height,
    validator_set::fetch_validator_set,
};

/// An update-client message together with the height it proves.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateClientResult {
    /// The message to submit to the destination chain.
    pub message: MsgUpdateClient,
    /// The source height carried by the header in [`Self::message`].
    pub height: Height,
}

impl UpdateClientResult {
    /// Wraps the message in a protobuf [`Any`].
    ///
    /// # Errors
    /// Returns an error if the message cannot be encoded.
    pub fn to_any(&self) -> Result<Any, UpdateClientError> {
        Ok(Any::from_msg(&self.message)?)
    }

    /// Encodes a [`TxBody`] holding only the message.
    ///
    /// # Errors
    /// Returns an error if the message cannot be encoded.
    pub fn to_tx_body(&self) -> Result<Vec<u8>, UpdateClientError> {
        Ok(TxBody {
            messages: vec![self.to_any()?],
            ..Default::default()
        }
        .encode_to_vec())
    }
}

/// Reads the revision height the light client `client_id` on `dst` trusts.
async fn trusted_height(dst: &ChainHandle) -> Result<u64, UpdateClientError> {
    let client_id = dst.client_id();
    let client_state = dst
        .query()
        .client_state(client_id)
        .await?
        .ok_or_else(|| ClientStateError::NotFound {
            client_id: client_id.to_string(),
        })?;

    let height = client_state
        .latest_height
        .ok_or_else(|| ClientStateError::MissingLatestHeight {
            client_id: client_id.to_string(),
        })?
        .revision_height;
    if height == 0 {
        return Err(ClientStateError::InvalidLatestHeight {
            client_id: client_id.to_string(),
            height,
        }
        .into());
    }

    Ok(height)
}

/// Builds the `MsgUpdateClient` that updates the light client hosted on `dst`
/// to the latest header of `src`.
///
/// The header carries the validator set at the new height and the validator
/// set at the height right after the one the client already trusts, which is
/// the set that signed the next block.
///
/// # Errors
/// Returns an error if any query fails, if the client on `dst` has no usable
/// latest height, if the source chain has not advanced past that height, or if
/// either validator set cannot be reconstructed.
#[tracing::instrument(skip_all)]
pub async fn build_update_client(
    src: &ChainHandle,
    dst: &ChainHandle,
) -> Result<UpdateClientResult, UpdateClientError> {
    let latest_height = trusted_height(dst).await?;

    let signed_header = src.query().latest_signed_header().await?;
    let header = signed_header
        .header
        .as_ref()
        .ok_or(QueryError::MissingField("signed_header.header"))?;
    let current_height = u64::try_from(header.height)
        .ok()
        .filter(|h| *h > 0)
        .ok_or(QueryError::InvalidHeaderHeight(header.height))?;
    let chain_id = header.chain_id.clone();

    if chain_id != src.chain_id() {
        tracing::warn!(
            configured = src.chain_id(),
            reported = %chain_id,
            "Source chain id differs from the signed header, using the header's"
        );
    }

    let next_trusted_height =
        latest_height
            .checked_add(1)
            .ok_or_else(|| ClientStateError::InvalidLatestHeight {
                client_id: dst.client_id().to_string(),
                height: latest_height,
            })?;

    if current_height <= latest_height {
        return Err(ConsistencyError::StaleHeader {
            trusted: latest_height,
            current: current_height,
        }
        .into());
    }

    let (validator_set, trusted_validators) = futures::try_join!(
        fetch_validator_set(src, current_height),
        fetch_validator_set(src, next_trusted_height),
    )?;

    tracing::info!(
        "Generating tx to update '{}' from height: {} to height: {}",
        dst.client_id(),
        latest_height,
        current_height
    );

    let proposed_header = Header {
        signed_header: Some(signed_header),
        validator_set: Some(validator_set.into()),
        trusted_height: Some(revision_height(latest_height, &chain_id)),
        trusted_validators: Some(trusted_validators.into()),
    };

    let message = MsgUpdateClient {
        client_id: dst.client_id().to_string(),
        client_message: Some(Any::from_msg(&proposed_header)?),
        signer: dst.signer_address().to_string(),
    };

    Ok(UpdateClientResult {
        message,
        height: revision_height(current_height, &chain_id),
    })
}
