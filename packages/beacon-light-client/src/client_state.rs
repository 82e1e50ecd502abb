//! This module defines [`ClientState`].

use beacon_types::consensus::{
    fork::{ForkParameters, Version},
    slot::compute_epoch_at_slot,
    sync_committee::compute_sync_committee_period_at_slot,
};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

/// The chain parameters a light client verifies against.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct ClientState {
    /// The genesis slot
    #[serde_as(as = "DisplayFromStr")]
    pub genesis_slot: u64,
    /// The number of slots per epoch
    #[serde_as(as = "DisplayFromStr")]
    pub slots_per_epoch: u64,
    /// The number of epochs per sync committee period
    #[serde_as(as = "DisplayFromStr")]
    pub epochs_per_sync_committee_period: u64,
    /// The fork parameters
    pub fork_parameters: ForkParameters,
}

impl ClientState {
    /// Returns the epoch at a given `slot`.
    ///
    /// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/phase0/beacon-chain.md#compute_epoch_at_slot)
    #[must_use]
    pub const fn compute_epoch_at_slot(&self, slot: u64) -> u64 {
        compute_epoch_at_slot(self.slots_per_epoch, slot)
    }

    /// Returns the sync committee period at a given `slot`.
    ///
    /// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/light-client/sync-protocol.md#compute_sync_committee_period_at_slot)
    #[must_use]
    pub const fn compute_sync_committee_period_at_slot(&self, slot: u64) -> u64 {
        compute_sync_committee_period_at_slot(
            self.slots_per_epoch,
            self.epochs_per_sync_committee_period,
            slot,
        )
    }

    /// Returns the fork version active at a given `epoch`.
    #[must_use]
    pub fn fork_version_at_epoch(&self, epoch: u64) -> Version {
        self.fork_parameters.compute_fork_version(epoch)
    }

    /// Returns the epoch at which the current fork activates. Headers below
    /// this epoch carry no execution payload commitment.
    #[must_use]
    pub const fn fork_activation_epoch(&self) -> u64 {
        self.fork_parameters.capella.epoch
    }

    /// Returns whether the current fork is active at a given `slot`.
    #[must_use]
    pub const fn is_fork_active_at_slot(&self, slot: u64) -> bool {
        self.compute_epoch_at_slot(slot) >= self.fork_activation_epoch()
    }
}
