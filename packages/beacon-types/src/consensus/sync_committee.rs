//! This module defines the sync committee types and period helpers.

use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};

use super::{
    bls::BlsPublicKey,
    slot::compute_epoch_at_slot,
    trust::{SignatureBytes, SignatureTrust, Unverified},
};

/// The sync committee of a period.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct SyncCommittee {
    /// The public keys of the committee members.
    pub pubkeys: Vec<BlsPublicKey>,
    /// The aggregate of all member public keys.
    pub aggregate_pubkey: BlsPublicKey,
}

/// The sync committee's aggregate attestation over a beacon block header.
///
/// Inside an unverified block or a freshly received light-client update the
/// aggregate signature is raw bytes (the default tier); inside a block at a
/// stronger tier it shares the block's tier.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[serde(bound = "")]
pub struct SyncAggregate<T: SignatureTrust = Unverified> {
    /// The bits representing the sync committee's participation.
    pub sync_committee_bits: Bytes,
    /// The aggregated signature of the participating members.
    pub sync_committee_signature: SignatureBytes<T>,
}

impl<T: SignatureTrust> SyncAggregate<T> {
    pub(crate) fn retag<U: SignatureTrust>(self) -> SyncAggregate<U> {
        SyncAggregate {
            sync_committee_bits: self.sync_committee_bits,
            sync_committee_signature: self.sync_committee_signature.retag(),
        }
    }

    /// Returns the number of participation bits that are set.
    #[must_use]
    pub fn num_sync_committee_participants(&self) -> u64 {
        self.sync_committee_bits
            .iter()
            .map(|byte| u64::from(byte.count_ones()))
            .sum()
    }

    /// Returns whether at least 2/3 of the sync committee signed.
    ///
    /// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/light-client/sync-protocol.md#process_light_client_update)
    #[must_use]
    pub fn validate_signature_supermajority(&self) -> bool {
        self.num_sync_committee_participants() * 3 >= (self.sync_committee_bits.len() as u64) * 8 * 2
    }
}

/// Returns the sync committee period at a given `epoch`.
///
/// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/validator.md#sync-committee)
#[must_use]
pub const fn compute_sync_committee_period(
    epochs_per_sync_committee_period: u64,
    epoch: u64,
) -> u64 {
    epoch / epochs_per_sync_committee_period
}

/// Returns the sync committee period at a given `slot`.
///
/// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/light-client/sync-protocol.md#compute_sync_committee_period_at_slot)
#[must_use]
pub const fn compute_sync_committee_period_at_slot(
    slots_per_epoch: u64,
    epochs_per_sync_committee_period: u64,
    slot: u64,
) -> u64 {
    compute_sync_committee_period(
        epochs_per_sync_committee_period,
        compute_epoch_at_slot(slots_per_epoch, slot),
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn aggregate_with_bits(bits: &[u8]) -> SyncAggregate {
        SyncAggregate {
            sync_committee_bits: Bytes::copy_from_slice(bits),
            sync_committee_signature: SignatureBytes::default(),
        }
    }

    #[test]
    fn test_num_sync_committee_participants() {
        assert_eq!(
            aggregate_with_bits(&[0b1111_0000, 0b0000_0001]).num_sync_committee_participants(),
            5
        );
        assert_eq!(aggregate_with_bits(&[0, 0, 0]).num_sync_committee_participants(), 0);
    }

    #[test]
    fn test_validate_signature_supermajority() {
        assert!(!aggregate_with_bits(&[0b1111_1111, 0]).validate_signature_supermajority());
        assert!(!aggregate_with_bits(&[0b1111_1111, 0b0000_0011]).validate_signature_supermajority());
        assert!(aggregate_with_bits(&[0b1111_1111, 0b0000_0111]).validate_signature_supermajority());
        assert!(aggregate_with_bits(&[0xff, 0xff]).validate_signature_supermajority());
    }

    #[test]
    fn test_sync_committee_period() {
        assert_eq!(compute_sync_committee_period(256, 0), 0);
        assert_eq!(compute_sync_committee_period(256, 255), 0);
        assert_eq!(compute_sync_committee_period(256, 256), 1);
        assert_eq!(compute_sync_committee_period_at_slot(32, 256, 32 * 256), 1);
    }
}
