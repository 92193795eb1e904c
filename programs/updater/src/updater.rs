//! Runs the update-client builder over the configured chain pairs.

use anyhow::Context;
use tm_client_updater_lib::{build_update_client, UpdateClientError, UpdateClientResult};

use crate::cli::PairConfig;

/// One line of program output: an update transaction ready for broadcast.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateOutput {
    /// The name of the pair.
    pub pair: String,
    /// The id of the updated client.
    pub client_id: String,
    /// The revision number of the proven height.
    pub revision_number: u64,
    /// The revision height of the proven height.
    pub revision_height: u64,
    /// The hex encoded `cosmos.tx.v1beta1.TxBody`.
    pub tx_body: String,
}

impl UpdateOutput {
    /// Describes `result` as the update of `pair`.
    ///
    /// # Errors
    /// Returns an error if the transaction body cannot be encoded.
    pub fn new(pair: &str, result: &UpdateClientResult) -> Result<Self, UpdateClientError> {
        Ok(Self {
            pair: pair.to_string(),
            client_id: result.message.client_id.clone(),
            revision_number: result.height.revision_number,
            revision_height: result.height.revision_height,
            tx_body: hex::encode(result.to_tx_body()?),
        })
    }
}

/// Builds the update for `pair`. With `reverse`, the client hosted on the
/// source chain is updated with headers from the destination chain.
///
/// # Errors
/// Returns an error if a chain cannot be reached or the update cannot be built.
#[tracing::instrument(skip_all, fields(pair = %pair.name, reverse = reverse))]
pub async fn update_pair(pair: &PairConfig, reverse: bool) -> anyhow::Result<UpdateOutput> {
    let (src, dst) = if reverse {
        (&pair.dst_chain, &pair.src_chain)
    } else {
        (&pair.src_chain, &pair.dst_chain)
    };

    let result = build_update_client(&src.chain_handle()?, &dst.chain_handle()?)
        .await
        .with_context(|| {
            format!(
                "failed to update client {} on {} from {}",
                dst.client_id, dst.chain_id, src.chain_id
            )
        })?;

    Ok(UpdateOutput::new(&pair.name, &result)?)
}

/// Updates every pair in order and prints one JSON line per built transaction.
///
/// A failing pair is logged and does not stop the others.
///
/// # Errors
/// Returns an error if any pair failed.
pub async fn run(pairs: &[&PairConfig], reverse: bool) -> anyhow::Result<()> {
    let mut failed = 0_usize;
    for pair in pairs {
        match update_pair(pair, reverse).await {
            Ok(output) => println!("{}", serde_json::to_string(&output)?),
            Err(e) => {
                tracing::error!(pair = %pair.name, "{e:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} pairs failed", pairs.len());
    }
    Ok(())
}
