//! This module defines the fork schedule types.

use alloy_primitives::FixedBytes;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

/// A fork version number.
pub type Version = FixedBytes<4>;

/// A scheduled fork: the version it stamps on signed data and the epoch it
/// activates at.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Fork {
    /// The fork version.
    pub version: Version,
    /// The epoch at which the fork activates.
    #[serde_as(as = "DisplayFromStr")]
    pub epoch: u64,
}

/// The fork schedule of the chain up to and including the current fork.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct ForkParameters {
    /// The genesis fork version.
    pub genesis_fork_version: Version,
    /// The genesis slot.
    #[serde_as(as = "DisplayFromStr")]
    pub genesis_slot: u64,
    /// The altair fork.
    pub altair: Fork,
    /// The bellatrix fork.
    pub bellatrix: Fork,
    /// The capella fork.
    pub capella: Fork,
}

impl ForkParameters {
    /// Returns the fork version active at a given `epoch`.
    ///
    /// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/phase0/beacon-chain.md#compute_fork_version)
    #[must_use]
    pub fn compute_fork_version(&self, epoch: u64) -> Version {
        [self.capella, self.bellatrix, self.altair]
            .into_iter()
            .find(|fork| epoch >= fork.epoch)
            .map_or(self.genesis_fork_version, |fork| fork.version)
    }
}
