//! This module lifts light-client objects from the previous fork's schema
//! into the current one.
//!
//! Every transform is total and lossless: fields the previous fork had are
//! copied verbatim, and the fields it lacked are filled with their canonical
//! defaults, which is exactly the shape the pre-activation branch of header
//! validation requires. An upgraded object therefore re-validates whenever
//! the original did.

use alloy_primitives::B256;
use beacon_types::consensus::{
    bellatrix,
    bootstrap::LightClientBootstrap,
    light_client_header::{
        ExecutionPayloadHeader, LightClientFinalityUpdate, LightClientHeader,
        LightClientOptimisticUpdate, LightClientUpdate,
    },
    merkle::{floorlog2, EXECUTION_PAYLOAD_GINDEX},
    store::LightClientStore,
};

// See spec: https://github.com/ethereum/consensus-specs/blob/dev/specs/capella/light-client/fork.md#upgrading-light-client-data
/// Upgrades a light client header. The execution payload commitment did not
/// exist in the previous fork, so it is legitimately absent and filled with
/// its default.
#[must_use]
pub fn upgrade_lc_header(header: bellatrix::LightClientHeader) -> LightClientHeader {
    LightClientHeader {
        beacon: header.beacon,
        execution: ExecutionPayloadHeader::default(),
        execution_branch: [B256::ZERO; floorlog2(EXECUTION_PAYLOAD_GINDEX)],
    }
}

/// Upgrades a light client bootstrap.
#[must_use]
pub fn upgrade_lc_bootstrap(bootstrap: bellatrix::LightClientBootstrap) -> LightClientBootstrap {
    LightClientBootstrap {
        header: upgrade_lc_header(bootstrap.header),
        current_sync_committee: bootstrap.current_sync_committee,
        current_sync_committee_branch: bootstrap.current_sync_committee_branch,
    }
}

/// Upgrades a light client update.
#[must_use]
pub fn upgrade_lc_update(update: bellatrix::LightClientUpdate) -> LightClientUpdate {
    LightClientUpdate {
        attested_header: upgrade_lc_header(update.attested_header),
        next_sync_committee: update.next_sync_committee,
        next_sync_committee_branch: update.next_sync_committee_branch,
        finalized_header: upgrade_lc_header(update.finalized_header),
        finality_branch: update.finality_branch,
        sync_aggregate: update.sync_aggregate,
        signature_slot: update.signature_slot,
    }
}

/// Upgrades a light client finality update.
#[must_use]
pub fn upgrade_lc_finality_update(
    finality_update: bellatrix::LightClientFinalityUpdate,
) -> LightClientFinalityUpdate {
    LightClientFinalityUpdate {
        attested_header: upgrade_lc_header(finality_update.attested_header),
        finalized_header: upgrade_lc_header(finality_update.finalized_header),
        finality_branch: finality_update.finality_branch,
        sync_aggregate: finality_update.sync_aggregate,
        signature_slot: finality_update.signature_slot,
    }
}

/// Upgrades a light client optimistic update.
#[must_use]
pub fn upgrade_lc_optimistic_update(
    optimistic_update: bellatrix::LightClientOptimisticUpdate,
) -> LightClientOptimisticUpdate {
    LightClientOptimisticUpdate {
        attested_header: upgrade_lc_header(optimistic_update.attested_header),
        sync_aggregate: optimistic_update.sync_aggregate,
        signature_slot: optimistic_update.signature_slot,
    }
}

/// Upgrades a light client store. An absent `best_valid_update` stays
/// absent; committees and participation counters are copied unchanged.
#[must_use]
pub fn upgrade_lc_store(store: bellatrix::LightClientStore) -> LightClientStore {
    LightClientStore {
        finalized_header: upgrade_lc_header(store.finalized_header),
        current_sync_committee: store.current_sync_committee,
        next_sync_committee: store.next_sync_committee,
        best_valid_update: store.best_valid_update.map(upgrade_lc_update),
        optimistic_header: upgrade_lc_header(store.optimistic_header),
        previous_max_active_participants: store.previous_max_active_participants,
        current_max_active_participants: store.current_max_active_participants,
    }
}

#[cfg(test)]
mod test {
    use beacon_types::consensus::{
        fork::{Fork, ForkParameters, Version},
        light_client_header::BeaconBlockHeader,
        sync_committee::SyncCommittee,
    };

    use super::*;
    use crate::{client_state::ClientState, sync_protocol_helpers::is_valid_light_client_header};

    fn prior_header(slot: u64) -> bellatrix::LightClientHeader {
        bellatrix::LightClientHeader {
            beacon: BeaconBlockHeader {
                slot,
                proposer_index: 7,
                parent_root: B256::repeat_byte(0x01),
                state_root: B256::repeat_byte(0x02),
                body_root: B256::repeat_byte(0x03),
            },
        }
    }

    #[test]
    fn test_upgrade_header_fills_defaults() {
        let upgraded = upgrade_lc_header(prior_header(100));
        assert_eq!(upgraded.beacon, prior_header(100).beacon);
        assert_eq!(upgraded.execution, ExecutionPayloadHeader::default());
        assert_eq!(upgraded.execution_branch, [B256::ZERO; 4]);
    }

    #[test]
    fn test_upgraded_header_revalidates() {
        let state = ClientState {
            genesis_slot: 0,
            slots_per_epoch: 32,
            epochs_per_sync_committee_period: 256,
            fork_parameters: ForkParameters {
                capella: Fork {
                    version: Version::with_last_byte(3),
                    epoch: 200,
                },
                ..Default::default()
            },
        };

        // a prior-fork header is below the activation epoch by construction
        let upgraded = upgrade_lc_header(prior_header(100 * 32));
        is_valid_light_client_header(&state, &upgraded).unwrap();
    }

    #[test]
    fn test_upgrade_bootstrap() {
        let bootstrap = bellatrix::LightClientBootstrap {
            header: prior_header(50),
            current_sync_committee: SyncCommittee::default(),
            current_sync_committee_branch: [B256::repeat_byte(0x04); 5],
        };

        let upgraded = upgrade_lc_bootstrap(bootstrap.clone());
        assert_eq!(upgraded.header.beacon, bootstrap.header.beacon);
        assert_eq!(
            upgraded.current_sync_committee_branch,
            bootstrap.current_sync_committee_branch
        );
    }

    #[test]
    fn test_upgrade_update_cascades_to_both_headers() {
        let mut update = bellatrix::LightClientUpdate {
            attested_header: prior_header(90),
            finalized_header: prior_header(80),
            signature_slot: 91,
            ..Default::default()
        };
        update.finality_branch = [B256::repeat_byte(0x05); 6];

        let upgraded = upgrade_lc_update(update.clone());
        assert_eq!(upgraded.attested_header.beacon, update.attested_header.beacon);
        assert_eq!(upgraded.finalized_header.beacon, update.finalized_header.beacon);
        assert_eq!(upgraded.finality_branch, update.finality_branch);
        assert_eq!(upgraded.signature_slot, update.signature_slot);
        assert_eq!(
            upgraded.attested_header.execution,
            ExecutionPayloadHeader::default()
        );
    }

    #[test]
    fn test_upgrade_variant_updates() {
        let finality = bellatrix::LightClientFinalityUpdate {
            attested_header: prior_header(90),
            finalized_header: prior_header(80),
            signature_slot: 91,
            ..Default::default()
        };
        let upgraded = upgrade_lc_finality_update(finality.clone());
        assert_eq!(upgraded.attested_header.beacon, finality.attested_header.beacon);
        assert_eq!(upgraded.signature_slot, finality.signature_slot);

        let optimistic = bellatrix::LightClientOptimisticUpdate {
            attested_header: prior_header(90),
            signature_slot: 91,
            ..Default::default()
        };
        let upgraded = upgrade_lc_optimistic_update(optimistic.clone());
        assert_eq!(upgraded.attested_header.beacon, optimistic.attested_header.beacon);
        assert_eq!(upgraded.signature_slot, optimistic.signature_slot);
    }

    #[test]
    fn test_upgrade_store_without_best_update() {
        let store = bellatrix::LightClientStore {
            finalized_header: prior_header(80),
            optimistic_header: prior_header(90),
            best_valid_update: None,
            previous_max_active_participants: 400,
            current_max_active_participants: 300,
            ..Default::default()
        };

        let upgraded = upgrade_lc_store(store.clone());
        assert_eq!(upgraded.best_valid_update, None);
        assert_eq!(upgraded.finalized_header.beacon, store.finalized_header.beacon);
        assert_eq!(upgraded.optimistic_header.beacon, store.optimistic_header.beacon);
        assert_eq!(upgraded.previous_max_active_participants, 400);
        assert_eq!(upgraded.current_max_active_participants, 300);
    }

    #[test]
    fn test_upgrade_store_with_best_update() {
        let store = bellatrix::LightClientStore {
            best_valid_update: Some(bellatrix::LightClientUpdate {
                attested_header: prior_header(90),
                finalized_header: prior_header(80),
                signature_slot: 91,
                ..Default::default()
            }),
            ..Default::default()
        };

        let upgraded = upgrade_lc_store(store);
        let best = upgraded.best_valid_update.unwrap();
        assert_eq!(best.attested_header.beacon.slot, 90);
        assert_eq!(best.attested_header.execution, ExecutionPayloadHeader::default());
    }
}
