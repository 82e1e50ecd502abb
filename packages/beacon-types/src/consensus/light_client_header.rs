//! This module defines the light-client header and update types of the
//! current fork.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use tree_hash_derive::TreeHash;

use super::{
    merkle::{floorlog2, EXECUTION_PAYLOAD_GINDEX, FINALIZED_ROOT_GINDEX, NEXT_SYNC_COMMITTEE_GINDEX},
    sync_committee::{SyncAggregate, SyncCommittee},
    wrappers::{WrappedBloom, WrappedBytes},
};

/// A light client update
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct LightClientUpdate {
    /// Header attested to by the sync committee
    pub attested_header: LightClientHeader,
    /// Next sync committee corresponding to `attested_header.state_root`
    pub next_sync_committee: Option<SyncCommittee>,
    /// The branch of the next sync committee
    pub next_sync_committee_branch: Option<[B256; floorlog2(NEXT_SYNC_COMMITTEE_GINDEX)]>,
    /// Finalized header corresponding to `attested_header.state_root`
    pub finalized_header: LightClientHeader,
    /// Branch of the finalized header
    pub finality_branch: [B256; floorlog2(FINALIZED_ROOT_GINDEX)],
    /// Sync committee aggregate signature
    pub sync_aggregate: SyncAggregate,
    /// Slot at which the aggregate signature was created (untrusted)
    #[serde_as(as = "DisplayFromStr")]
    pub signature_slot: u64,
}

impl LightClientUpdate {
    /// Returns whether `finalized.slot <= attested.slot <= signature_slot`
    /// holds for this update.
    #[must_use]
    pub const fn has_valid_slot_order(&self) -> bool {
        self.finalized_header.beacon.slot <= self.attested_header.beacon.slot
            && self.attested_header.beacon.slot <= self.signature_slot
    }
}

/// A light client finality update
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct LightClientFinalityUpdate {
    /// Header attested to by the sync committee
    pub attested_header: LightClientHeader,
    /// Finalized header corresponding to `attested_header.state_root`
    pub finalized_header: LightClientHeader,
    /// Branch of the finalized header
    pub finality_branch: [B256; floorlog2(FINALIZED_ROOT_GINDEX)],
    /// Sync committee aggregate signature
    pub sync_aggregate: SyncAggregate,
    /// Slot at which the aggregate signature was created (untrusted)
    #[serde_as(as = "DisplayFromStr")]
    pub signature_slot: u64,
}

/// A light client optimistic update
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct LightClientOptimisticUpdate {
    /// Header attested to by the sync committee
    pub attested_header: LightClientHeader,
    /// Sync committee aggregate signature
    pub sync_aggregate: SyncAggregate,
    /// Slot at which the aggregate signature was created (untrusted)
    #[serde_as(as = "DisplayFromStr")]
    pub signature_slot: u64,
}

// Light Client Finality Update to Light Client Update conversion
impl From<LightClientFinalityUpdate> for LightClientUpdate {
    fn from(finality_update: LightClientFinalityUpdate) -> Self {
        Self {
            attested_header: finality_update.attested_header,
            next_sync_committee: None,
            next_sync_committee_branch: None,
            finalized_header: finality_update.finalized_header,
            finality_branch: finality_update.finality_branch,
            sync_aggregate: finality_update.sync_aggregate,
            signature_slot: finality_update.signature_slot,
        }
    }
}

// Each update variant drops fields from the previous one; the downward
// conversions are total.
impl From<LightClientUpdate> for LightClientFinalityUpdate {
    fn from(update: LightClientUpdate) -> Self {
        Self {
            attested_header: update.attested_header,
            finalized_header: update.finalized_header,
            finality_branch: update.finality_branch,
            sync_aggregate: update.sync_aggregate,
            signature_slot: update.signature_slot,
        }
    }
}

impl From<LightClientFinalityUpdate> for LightClientOptimisticUpdate {
    fn from(finality_update: LightClientFinalityUpdate) -> Self {
        Self {
            attested_header: finality_update.attested_header,
            sync_aggregate: finality_update.sync_aggregate,
            signature_slot: finality_update.signature_slot,
        }
    }
}

impl From<LightClientUpdate> for LightClientOptimisticUpdate {
    fn from(update: LightClientUpdate) -> Self {
        Self {
            attested_header: update.attested_header,
            sync_aggregate: update.sync_aggregate,
            signature_slot: update.signature_slot,
        }
    }
}

/// The header of a light client
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct LightClientHeader {
    /// The beacon block header
    pub beacon: BeaconBlockHeader,
    /// The execution payload header
    pub execution: ExecutionPayloadHeader,
    /// The execution branch
    pub execution_branch: [B256; floorlog2(EXECUTION_PAYLOAD_GINDEX)],
}

/// The beacon block header
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default, TreeHash)]
pub struct BeaconBlockHeader {
    /// The slot to which this block corresponds
    #[serde_as(as = "DisplayFromStr")]
    pub slot: u64,
    /// The index of validator in validator registry
    #[serde_as(as = "DisplayFromStr")]
    pub proposer_index: u64,
    /// The signing merkle root of the parent `BeaconBlock`
    pub parent_root: B256,
    /// The tree hash merkle root of the `BeaconState` for the `BeaconBlock`
    pub state_root: B256,
    /// The tree hash merkle root of the `BeaconBlockBody` for the `BeaconBlock`
    pub body_root: B256,
}

/// Header to track the execution block
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default, TreeHash)]
pub struct ExecutionPayloadHeader {
    /// The parent hash of the execution payload header
    pub parent_hash: B256,
    /// Block fee recipient
    pub fee_recipient: Address,
    /// The state root
    pub state_root: B256,
    /// The root of the receipts trie
    pub receipts_root: B256,
    /// The logs bloom filter
    pub logs_bloom: WrappedBloom,
    /// The previous Randao value, used to compute the randomness on the execution layer.
    pub prev_randao: B256,
    /// The block number of the execution payload
    #[serde_as(as = "DisplayFromStr")]
    pub block_number: u64,
    /// Execution block gas limit
    #[serde_as(as = "DisplayFromStr")]
    pub gas_limit: u64,
    /// Execution block gas used
    #[serde_as(as = "DisplayFromStr")]
    pub gas_used: u64,
    /// The timestamp of the execution payload
    #[serde_as(as = "DisplayFromStr")]
    pub timestamp: u64,
    /// The extra data of the execution payload
    pub extra_data: WrappedBytes,
    /// Block base fee per gas
    pub base_fee_per_gas: U256,
    /// The block hash
    pub block_hash: B256,
    /// SSZ hash tree root of the transaction list
    pub transactions_root: B256,
    /// Tree root of the withdrawals list
    pub withdrawals_root: B256,
}

#[cfg(test)]
mod test {
    use super::*;

    fn update_with_slots(finalized: u64, attested: u64, signature: u64) -> LightClientUpdate {
        let mut update = LightClientUpdate::default();
        update.finalized_header.beacon.slot = finalized;
        update.attested_header.beacon.slot = attested;
        update.signature_slot = signature;
        update
    }

    #[test]
    fn test_slot_order() {
        assert!(update_with_slots(10, 10, 10).has_valid_slot_order());
        assert!(update_with_slots(10, 20, 21).has_valid_slot_order());
        assert!(!update_with_slots(22, 20, 21).has_valid_slot_order());
        assert!(!update_with_slots(10, 20, 19).has_valid_slot_order());
    }

    #[test]
    fn test_update_variant_conversions_drop_fields() {
        let mut update = update_with_slots(1, 2, 3);
        update.next_sync_committee = Some(SyncCommittee::default());
        update.next_sync_committee_branch =
            Some([B256::ZERO; floorlog2(NEXT_SYNC_COMMITTEE_GINDEX)]);

        let finality: LightClientFinalityUpdate = update.clone().into();
        assert_eq!(finality.attested_header, update.attested_header);
        assert_eq!(finality.finalized_header, update.finalized_header);
        assert_eq!(finality.signature_slot, update.signature_slot);

        let optimistic: LightClientOptimisticUpdate = finality.clone().into();
        assert_eq!(optimistic.attested_header, update.attested_header);
        assert_eq!(optimistic.signature_slot, update.signature_slot);

        // Lifting a finality update back only loses the committee fields.
        let lifted: LightClientUpdate = finality.into();
        assert_eq!(lifted.next_sync_committee, None);
        assert_eq!(lifted.next_sync_committee_branch, None);
        assert_eq!(lifted.finalized_header, update.finalized_header);
    }

    #[test]
    fn test_header_serde_round_trip() {
        let mut header = LightClientHeader::default();
        header.beacon.slot = 12_345;
        header.execution.block_number = 80;

        let json = serde_json::to_string(&header).unwrap();
        // u64 fields travel as decimal strings
        assert!(json.contains("\"12345\""));
        let decoded: LightClientHeader = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, header);
    }
}
