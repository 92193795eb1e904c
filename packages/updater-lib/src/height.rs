//! Pairs raw block heights with the revision number embedded in a chain id.

use ibc_proto::ibc::core::client::v1::Height;

/// Extracts the revision number from a chain id such as `cosmoshub-4`.
///
/// Only a trailing `-<digits>` suffix whose first digit is 1-9 counts, so
/// `foo-0`, `foo-07` and `foo` all resolve to revision 0.
#[must_use]
pub fn parse_revision_number(chain_id: &str) -> u64 {
    let Some((_, suffix)) = chain_id.rsplit_once('-') else {
        return 0;
    };

    let mut digits = suffix.bytes();
    let leading_ok = digits.next().is_some_and(|b| matches!(b, b'1'..=b'9'));
    if !leading_ok || !digits.all(|b| b.is_ascii_digit()) {
        return 0;
    }

    // A suffix too large for u64 is not a revision number.
    suffix.parse().unwrap_or(0)
}

/// Builds the IBC [`Height`] of `height` on the chain identified by `chain_id`.
#[must_use]
pub fn revision_height(height: u64, chain_id: &str) -> Height {
    Height {
        revision_number: parse_revision_number(chain_id),
        revision_height: height,
    }
}
