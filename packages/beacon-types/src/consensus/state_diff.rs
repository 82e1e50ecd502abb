//! This module defines the compact delta between two beacon states.
//!
//! Every state field falls into one of five mutation categories, and the
//! shape of [`BeaconStateDiff`] fixes the contract a differencing engine
//! must honor:
//!
//! - static or rarely changing fields travel verbatim,
//! - ring buffers carry only the window of entries touched since the
//!   reference state (one epoch's worth),
//! - fields with no exploitable incremental structure are replaced whole,
//! - the validator registry is split so the large immutable identity half is
//!   transmitted once at deposit time and never again,
//! - append-only lists carry a presence flag and the single new entry.
//!
//! A diff is only meaningful relative to the exact reference state it was
//! computed against. Applying it to that state must reproduce the target
//! state's canonical hash.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use super::{
    light_client_header::{BeaconBlockHeader, ExecutionPayloadHeader},
    state::{
        Checkpoint, Eth1Data, HistoricalSummary, StateFork, ValidatorIdentity, ValidatorStatus,
        SLOTS_PER_EPOCH,
    },
    sync_committee::SyncCommittee,
};

/// One epoch's worth of entries from a root ring buffer, starting at the
/// reference state's slot position.
pub type RootWindow = [B256; SLOTS_PER_EPOCH];

/// A withdrawal-credential rewrite. The credential is immutable apart from
/// the one-time change from a BLS-derived value to an execution address, so
/// these travel as a separate list instead of widening every status entry.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct WithdrawalCredentialChange {
    /// The index of the validator whose credential changed.
    #[serde_as(as = "DisplayFromStr")]
    pub validator_index: u64,
    /// The new execution-address credential.
    pub withdrawal_credentials: B256,
}

/// A replayed status for one existing validator.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct ValidatorStatusChange {
    /// The index of the validator the status belongs to.
    #[serde_as(as = "DisplayFromStr")]
    pub validator_index: u64,
    /// The validator's full mutable status after the transition.
    pub status: ValidatorStatus,
}

/// The delta between a reference beacon state and the state one epoch later.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct BeaconStateDiff {
    // Static or rarely changing fields, encoded verbatim.
    /// The target state's slot.
    #[serde_as(as = "DisplayFromStr")]
    pub slot: u64,
    /// The fork the target state is on.
    pub fork: StateFork,
    /// The latest processed block header.
    pub latest_block_header: BeaconBlockHeader,
    /// The number of deposits processed so far.
    #[serde_as(as = "DisplayFromStr")]
    pub eth1_deposit_index: u64,
    /// Justification bits of the last four epochs.
    pub justification_bits: u8,
    /// The previous justified checkpoint.
    pub previous_justified_checkpoint: Checkpoint,
    /// The current justified checkpoint.
    pub current_justified_checkpoint: Checkpoint,
    /// The finalized checkpoint.
    pub finalized_checkpoint: Checkpoint,
    /// The index the next withdrawal will carry.
    #[serde_as(as = "DisplayFromStr")]
    pub next_withdrawal_index: u64,
    /// The validator the withdrawal sweep resumes from.
    #[serde_as(as = "DisplayFromStr")]
    pub next_withdrawal_validator_index: u64,

    // Ring buffers: only the entries touched since the reference state.
    /// The block roots written during the diffed epoch.
    pub block_roots: Box<RootWindow>,
    /// The state roots written during the diffed epoch.
    pub state_roots: Box<RootWindow>,
    /// The randao mix written at the diffed epoch's position.
    pub randao_mix: B256,
    /// The slashed amount written at the diffed epoch's position, in gwei.
    #[serde_as(as = "DisplayFromStr")]
    pub slashing: u64,

    // Full replacements: no incremental structure to exploit.
    /// The target state's eth1 view.
    pub eth1_data: Eth1Data,
    /// The eth1 votes of the target state.
    pub eth1_data_votes: Vec<Eth1Data>,
    /// The current sync committee, when it rotated.
    pub current_sync_committee: Option<SyncCommittee>,
    /// The next sync committee, when it rotated.
    pub next_sync_committee: Option<SyncCommittee>,
    /// The most recent execution payload header.
    pub latest_execution_payload_header: ExecutionPayloadHeader,

    // Validator registry, split into identity and status halves.
    /// Identities of validators deposited during the diffed epoch, in
    /// registry order. Transmitted exactly once per validator.
    pub new_validators: Vec<ValidatorIdentity>,
    /// Status replays for validators whose mutable half changed, including
    /// the ones in `new_validators`.
    pub validator_statuses: Vec<ValidatorStatusChange>,
    /// One-time withdrawal-credential rewrites.
    pub withdrawal_credential_changes: Vec<WithdrawalCredentialChange>,
    /// Balance replays for validators whose balance changed, in gwei,
    /// paired with the validator index.
    #[serde_as(as = "Vec<(DisplayFromStr, DisplayFromStr)>")]
    pub balance_changes: Vec<(u64, u64)>,

    // Append-only lists: a presence flag plus the single new entry.
    /// The historical summary appended during the diffed epoch, if the epoch
    /// closed an 8192-slot root period.
    pub appended_historical_summary: Option<HistoricalSummary>,
}

impl BeaconStateDiff {
    /// Returns whether the diffed epoch appended a historical summary.
    #[must_use]
    pub const fn historical_summary_added(&self) -> bool {
        self.appended_historical_summary.is_some()
    }
}
