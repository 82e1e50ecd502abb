//! This module defines the beacon state of the current fork.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use super::{
    bls::BlsPublicKey,
    light_client_header::{BeaconBlockHeader, ExecutionPayloadHeader},
    sync_committee::SyncCommittee,
};

/// The number of slots per epoch (mainnet preset).
pub const SLOTS_PER_EPOCH: usize = 32;
/// The length of the block/state root ring buffers (mainnet preset).
pub const SLOTS_PER_HISTORICAL_ROOT: usize = 8192;
/// The length of the randao mix ring buffer (mainnet preset).
pub const EPOCHS_PER_HISTORICAL_VECTOR: usize = 65_536;
/// The length of the slashings ring buffer (mainnet preset).
pub const EPOCHS_PER_SLASHINGS_VECTOR: usize = 8192;
/// The number of epochs eth1 data votes are collected over (mainnet preset).
pub const EPOCHS_PER_ETH1_VOTING_PERIOD: usize = 64;

/// A checkpoint: the root of the first block of an epoch.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Checkpoint {
    /// The epoch of the checkpoint.
    #[serde_as(as = "DisplayFromStr")]
    pub epoch: u64,
    /// The root of the epoch's first block.
    pub root: B256,
}

/// A view of the eth1 deposit contract agreed on by the chain.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct Eth1Data {
    /// The root of the deposit tree.
    pub deposit_root: B256,
    /// The number of deposits in the tree.
    #[serde_as(as = "DisplayFromStr")]
    pub deposit_count: u64,
    /// The hash of the eth1 block holding the tree.
    pub block_hash: B256,
}

/// The fork the state is currently on.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct StateFork {
    /// The version of the previous fork.
    pub previous_version: super::fork::Version,
    /// The version of the current fork.
    pub current_version: super::fork::Version,
    /// The epoch the current fork activated at.
    #[serde_as(as = "DisplayFromStr")]
    pub epoch: u64,
}

/// A registry entry for one validator.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct Validator {
    /// The validator's public key. Never changes.
    pub pubkey: BlsPublicKey,
    /// Where withdrawn funds go. Changes at most once, from a BLS-derived
    /// credential to an execution-address credential.
    pub withdrawal_credentials: B256,
    /// The balance counted for duties and rewards, in gwei.
    #[serde_as(as = "DisplayFromStr")]
    pub effective_balance: u64,
    /// Whether the validator has been slashed.
    pub slashed: bool,
    /// When the validator became eligible for activation.
    #[serde_as(as = "DisplayFromStr")]
    pub activation_eligibility_epoch: u64,
    /// When the validator was activated.
    #[serde_as(as = "DisplayFromStr")]
    pub activation_epoch: u64,
    /// When the validator exited.
    #[serde_as(as = "DisplayFromStr")]
    pub exit_epoch: u64,
    /// When the validator's funds become withdrawable.
    #[serde_as(as = "DisplayFromStr")]
    pub withdrawable_epoch: u64,
}

/// The identity part of a [`Validator`]: set at deposit time, never rewritten
/// afterwards. State deltas transmit it once instead of once per delta.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct ValidatorIdentity {
    /// The validator's public key.
    pub pubkey: BlsPublicKey,
    /// The withdrawal credential the validator was registered with.
    pub withdrawal_credentials: B256,
}

/// The mutable status part of a [`Validator`].
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct ValidatorStatus {
    /// The balance counted for duties and rewards, in gwei.
    #[serde_as(as = "DisplayFromStr")]
    pub effective_balance: u64,
    /// Whether the validator has been slashed.
    pub slashed: bool,
    /// When the validator became eligible for activation.
    #[serde_as(as = "DisplayFromStr")]
    pub activation_eligibility_epoch: u64,
    /// When the validator was activated.
    #[serde_as(as = "DisplayFromStr")]
    pub activation_epoch: u64,
    /// When the validator exited.
    #[serde_as(as = "DisplayFromStr")]
    pub exit_epoch: u64,
    /// When the validator's funds become withdrawable.
    #[serde_as(as = "DisplayFromStr")]
    pub withdrawable_epoch: u64,
}

impl Validator {
    /// Splits the registry entry into its immutable identity and mutable
    /// status parts.
    #[must_use]
    pub const fn split(&self) -> (ValidatorIdentity, ValidatorStatus) {
        (
            ValidatorIdentity {
                pubkey: self.pubkey,
                withdrawal_credentials: self.withdrawal_credentials,
            },
            ValidatorStatus {
                effective_balance: self.effective_balance,
                slashed: self.slashed,
                activation_eligibility_epoch: self.activation_eligibility_epoch,
                activation_epoch: self.activation_epoch,
                exit_epoch: self.exit_epoch,
                withdrawable_epoch: self.withdrawable_epoch,
            },
        )
    }

    /// Rebuilds a registry entry from its identity and status parts.
    #[must_use]
    pub const fn from_parts(identity: ValidatorIdentity, status: ValidatorStatus) -> Self {
        Self {
            pubkey: identity.pubkey,
            withdrawal_credentials: identity.withdrawal_credentials,
            effective_balance: status.effective_balance,
            slashed: status.slashed,
            activation_eligibility_epoch: status.activation_eligibility_epoch,
            activation_epoch: status.activation_epoch,
            exit_epoch: status.exit_epoch,
            withdrawable_epoch: status.withdrawable_epoch,
        }
    }
}

/// A summary of one completed 8192-slot period of block and state roots.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct HistoricalSummary {
    /// The root of the period's block roots.
    pub block_summary_root: B256,
    /// The root of the period's state roots.
    pub state_summary_root: B256,
}

/// The full beacon state of the current fork.
///
/// Ring-buffer fields (`block_roots`, `state_roots`, `randao_mixes`,
/// `slashings`) have fixed lengths given by the preset constants above;
/// bounds are enforced by the codec at construction, not per mutation.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct BeaconState {
    /// The unix timestamp of genesis.
    #[serde_as(as = "DisplayFromStr")]
    pub genesis_time: u64,
    /// The root of the genesis validator registry.
    pub genesis_validators_root: B256,
    /// The current slot.
    #[serde_as(as = "DisplayFromStr")]
    pub slot: u64,
    /// The fork the state is on.
    pub fork: StateFork,
    /// The latest processed block header, with a zeroed state root until the
    /// next slot's state is known.
    pub latest_block_header: BeaconBlockHeader,
    /// Ring buffer of recent block roots ([`SLOTS_PER_HISTORICAL_ROOT`]).
    pub block_roots: Vec<B256>,
    /// Ring buffer of recent state roots ([`SLOTS_PER_HISTORICAL_ROOT`]).
    pub state_roots: Vec<B256>,
    /// Roots of completed root periods; frozen since the capella fork in
    /// favor of `historical_summaries`.
    pub historical_roots: Vec<B256>,
    /// The current eth1 view.
    pub eth1_data: Eth1Data,
    /// Eth1 views voted on this voting period
    /// ([`EPOCHS_PER_ETH1_VOTING_PERIOD`] · [`SLOTS_PER_EPOCH`] entries max).
    pub eth1_data_votes: Vec<Eth1Data>,
    /// The number of deposits processed so far.
    #[serde_as(as = "DisplayFromStr")]
    pub eth1_deposit_index: u64,
    /// The validator registry.
    pub validators: Vec<Validator>,
    /// Per-validator balances in gwei.
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub balances: Vec<u64>,
    /// Ring buffer of randao mixes ([`EPOCHS_PER_HISTORICAL_VECTOR`]).
    pub randao_mixes: Vec<B256>,
    /// Ring buffer of per-epoch slashed amounts ([`EPOCHS_PER_SLASHINGS_VECTOR`]).
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub slashings: Vec<u64>,
    /// Per-validator participation flags for the previous epoch.
    pub previous_epoch_participation: Vec<u8>,
    /// Per-validator participation flags for the current epoch.
    pub current_epoch_participation: Vec<u8>,
    /// Justification bits of the last four epochs (low four bits used).
    pub justification_bits: u8,
    /// The previous justified checkpoint.
    pub previous_justified_checkpoint: Checkpoint,
    /// The current justified checkpoint.
    pub current_justified_checkpoint: Checkpoint,
    /// The finalized checkpoint.
    pub finalized_checkpoint: Checkpoint,
    /// Per-validator inactivity scores.
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub inactivity_scores: Vec<u64>,
    /// The sync committee of the current period.
    pub current_sync_committee: SyncCommittee,
    /// The sync committee of the next period.
    pub next_sync_committee: SyncCommittee,
    /// The most recent execution payload header.
    pub latest_execution_payload_header: ExecutionPayloadHeader,
    /// The index the next withdrawal will carry.
    #[serde_as(as = "DisplayFromStr")]
    pub next_withdrawal_index: u64,
    /// The validator the withdrawal sweep resumes from.
    #[serde_as(as = "DisplayFromStr")]
    pub next_withdrawal_validator_index: u64,
    /// Summaries of completed root periods; grows by at most one entry per
    /// 8192 slots.
    pub historical_summaries: Vec<HistoricalSummary>,
}

#[cfg(test)]
mod test {
    use alloy_primitives::B256;

    use super::*;

    #[test]
    fn test_validator_split_round_trip() {
        let validator = Validator {
            pubkey: BlsPublicKey::default(),
            withdrawal_credentials: B256::repeat_byte(0x01),
            effective_balance: 32_000_000_000,
            slashed: false,
            activation_eligibility_epoch: 3,
            activation_epoch: 5,
            exit_epoch: u64::MAX,
            withdrawable_epoch: u64::MAX,
        };

        let (identity, status) = validator.split();
        assert_eq!(identity.pubkey, validator.pubkey);
        assert_eq!(Validator::from_parts(identity, status), validator);
    }

    #[test]
    fn test_status_excludes_identity() {
        let mut validator = Validator::default();
        let (_, status_before) = validator.split();
        validator.pubkey = BlsPublicKey(alloy_primitives::FixedBytes::from([9_u8; 48]));
        let (_, status_after) = validator.split();
        // rewriting the identity does not touch the status half
        assert_eq!(status_before, status_after);
    }
}
