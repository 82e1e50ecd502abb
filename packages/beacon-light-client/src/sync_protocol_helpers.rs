//! This module implements the sync protocol helpers defined in [consensus-specs](https://github.com/ethereum/consensus-specs)

use alloy_primitives::B256;
use beacon_types::consensus::{
    light_client_header::{ExecutionPayloadHeader, LightClientHeader},
    merkle::{floorlog2, get_subtree_index, EXECUTION_PAYLOAD_GINDEX},
};
use tree_hash::TreeHash;

use crate::{
    client_state::ClientState, ensure, error::LightClientError, merkle::validate_merkle_branch,
};

// See spec: https://github.com/ethereum/consensus-specs/blob/dev/specs/capella/light-client/sync-protocol.md#modified-get_lc_execution_root
/// Returns the execution root the header commits to: the tree hash root of
/// its execution payload header once the fork is active, and a zero digest
/// before.
#[must_use]
pub fn get_lc_execution_root(client_state: &ClientState, header: &LightClientHeader) -> B256 {
    if client_state.is_fork_active_at_slot(header.beacon.slot) {
        header.execution.tree_hash_root()
    } else {
        B256::ZERO
    }
}

// See spec: https://github.com/ethereum/consensus-specs/blob/dev/specs/capella/light-client/sync-protocol.md#modified-is_valid_light_client_header
/// Validates a light client header.
///
/// Before the fork activates the execution fields did not exist, so they must
/// be transmitted as their defaults; the check is structural equality against
/// the default sentinel, matching the protocol. From activation on, the
/// execution branch must prove the payload header's root against
/// `beacon.body_root` at the fixed generalized index.
///
/// Every header entering a store passes through this predicate, whether it
/// arrived from the network or was produced by a fork upgrade.
///
/// # Errors
/// Returns an error if the header cannot be validated.
pub fn is_valid_light_client_header(
    client_state: &ClientState,
    header: &LightClientHeader,
) -> Result<(), LightClientError> {
    if !client_state.is_fork_active_at_slot(header.beacon.slot) {
        ensure!(
            header.execution == ExecutionPayloadHeader::default(),
            LightClientError::ExecutionPayloadMustBeDefault
        );
        ensure!(
            header.execution_branch == [B256::ZERO; floorlog2(EXECUTION_PAYLOAD_GINDEX)],
            LightClientError::ExecutionBranchMustBeDefault
        );

        return Ok(());
    }

    validate_merkle_branch(
        get_lc_execution_root(client_state, header),
        &header.execution_branch,
        floorlog2(EXECUTION_PAYLOAD_GINDEX),
        get_subtree_index(EXECUTION_PAYLOAD_GINDEX),
        header.beacon.body_root,
    )
}
