//! Light-client objects in the schema of the previous (bellatrix) fork.
//!
//! The execution-payload commitment does not exist in this schema: a header
//! is just its beacon part. Sync committees, aggregates and the beacon block
//! header itself are identical across the two forks and are shared with the
//! current-fork module.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use super::{
    light_client_header::BeaconBlockHeader,
    merkle::{floorlog2, CURRENT_SYNC_COMMITTEE_GINDEX, FINALIZED_ROOT_GINDEX, NEXT_SYNC_COMMITTEE_GINDEX},
    sync_committee::{SyncAggregate, SyncCommittee},
};

/// The header of a light client, before the execution commitment existed.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct LightClientHeader {
    /// The beacon block header
    pub beacon: BeaconBlockHeader,
}

/// The light client bootstrap of the previous fork.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct LightClientBootstrap {
    /// The light client header
    pub header: LightClientHeader,
    /// The current sync committee
    pub current_sync_committee: SyncCommittee,
    /// The branch of the current sync committee
    pub current_sync_committee_branch: [B256; floorlog2(CURRENT_SYNC_COMMITTEE_GINDEX)],
}

/// A light client update of the previous fork.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
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

/// A light client finality update of the previous fork.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
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

/// A light client optimistic update of the previous fork.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct LightClientOptimisticUpdate {
    /// Header attested to by the sync committee
    pub attested_header: LightClientHeader,
    /// Sync committee aggregate signature
    pub sync_aggregate: SyncAggregate,
    /// Slot at which the aggregate signature was created (untrusted)
    #[serde_as(as = "DisplayFromStr")]
    pub signature_slot: u64,
}

/// The light client store of the previous fork.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct LightClientStore {
    /// The most recent finalized header.
    pub finalized_header: LightClientHeader,
    /// The sync committee of the current period.
    pub current_sync_committee: SyncCommittee,
    /// The sync committee of the next period, once proven.
    pub next_sync_committee: Option<SyncCommittee>,
    /// The best update seen in the current period.
    pub best_valid_update: Option<LightClientUpdate>,
    /// The most recent header with a reasonable participation level.
    pub optimistic_header: LightClientHeader,
    /// Highest participant count seen in the previous period.
    #[serde_as(as = "DisplayFromStr")]
    pub previous_max_active_participants: u64,
    /// Highest participant count seen in the current period.
    #[serde_as(as = "DisplayFromStr")]
    pub current_max_active_participants: u64,
}
