//! This module defines the light-client bootstrap object.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use super::{
    light_client_header::LightClientHeader,
    merkle::{floorlog2, CURRENT_SYNC_COMMITTEE_GINDEX},
    sync_committee::SyncCommittee,
};

/// The light client bootstrap
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct LightClientBootstrap {
    /// The light client header
    pub header: LightClientHeader,
    /// The current sync committee
    pub current_sync_committee: SyncCommittee,
    /// The branch of the current sync committee
    pub current_sync_committee_branch: [B256; floorlog2(CURRENT_SYNC_COMMITTEE_GINDEX)],
}
