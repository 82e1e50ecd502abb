//! This module defines the long-lived state tracked by a light client.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use super::{
    light_client_header::{LightClientHeader, LightClientUpdate},
    sync_committee::SyncCommittee,
};

/// The state a light client carries between updates.
///
/// The store is plain data: the update-processing state machine mutates it,
/// and callers serialize access to a given instance.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct LightClientStore {
    /// The most recent finalized header.
    pub finalized_header: LightClientHeader,
    /// The sync committee of the current period.
    pub current_sync_committee: SyncCommittee,
    /// The sync committee of the next period, once proven.
    pub next_sync_committee: Option<SyncCommittee>,
    /// The best update seen in the current period, kept until finality or a
    /// safe participation level promotes it.
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

impl LightClientStore {
    /// Returns the participation level an update must reach to be accepted
    /// optimistically: half the best level seen over the last two periods.
    ///
    /// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/light-client/sync-protocol.md#get_safety_threshold)
    #[must_use]
    pub const fn safety_threshold(&self) -> u64 {
        let max = if self.previous_max_active_participants > self.current_max_active_participants {
            self.previous_max_active_participants
        } else {
            self.current_max_active_participants
        };
        max / 2
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_safety_threshold() {
        let mut store = LightClientStore::default();
        assert_eq!(store.safety_threshold(), 0);

        store.current_max_active_participants = 300;
        store.previous_max_active_participants = 400;
        assert_eq!(store.safety_threshold(), 200);

        store.current_max_active_participants = 512;
        assert_eq!(store.safety_threshold(), 256);
    }
}
