//! This module defines constants related to merkle trees in the beacon chain.

/// `get_generalized_index(BeaconState, 'finalized_checkpoint', 'root')` (= 105)
pub const FINALIZED_ROOT_GINDEX: u64 = 105;
/// `get_generalized_index(BeaconState, 'current_sync_committee')` (= 54)
pub const CURRENT_SYNC_COMMITTEE_GINDEX: u64 = 54;
/// `get_generalized_index(BeaconState, 'next_sync_committee')` (= 55)
pub const NEXT_SYNC_COMMITTEE_GINDEX: u64 = 55;

// https://github.com/ethereum/consensus-specs/blob/dev/specs/capella/light-client/sync-protocol.md#constants
/// `get_generalized_index(BeaconBlockBody, 'execution_payload')` (= 25)
pub const EXECUTION_PAYLOAD_GINDEX: u64 = 25;

/// Convenience function safely to call [`u64::ilog2`] and convert the result into a usize.
///
/// This is the depth of the merkle branch proving the node at generalized
/// index `n`.
///
/// # Panics
/// Panics if `n == 0`: the generalized index of a tree node is always at least
/// 1 (the root), so a zero index is a caller bug, not a proof failure.
#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
#[must_use]
pub const fn floorlog2(n: u64) -> usize {
    // conversion is safe since usize is either 32 or 64 bits as per cfg above
    n.ilog2() as usize
}

// See spec: <https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/light-client/sync-protocol.md#get_subtree_index>
/// Returns the position of a node among the nodes at its depth.
///
/// The bits of the subtree index, least significant first, say at each level
/// whether the proven node is a right (1) or left (0) child.
///
/// # Panics
/// Panics if `idx == 0`, see [`floorlog2`].
#[must_use]
pub const fn get_subtree_index(idx: u64) -> u64 {
    idx % 2_u64.pow(idx.ilog2())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_floorlog2() {
        assert_eq!(floorlog2(1), 0);
        assert_eq!(floorlog2(2), 1);
        assert_eq!(floorlog2(EXECUTION_PAYLOAD_GINDEX), 4);
        assert_eq!(floorlog2(CURRENT_SYNC_COMMITTEE_GINDEX), 5);
        assert_eq!(floorlog2(NEXT_SYNC_COMMITTEE_GINDEX), 5);
        assert_eq!(floorlog2(FINALIZED_ROOT_GINDEX), 6);
    }

    #[test]
    fn test_get_subtree_index() {
        assert_eq!(get_subtree_index(1), 0);
        assert_eq!(get_subtree_index(EXECUTION_PAYLOAD_GINDEX), 9);
        assert_eq!(get_subtree_index(CURRENT_SYNC_COMMITTEE_GINDEX), 22);
        assert_eq!(get_subtree_index(NEXT_SYNC_COMMITTEE_GINDEX), 23);
        assert_eq!(get_subtree_index(FINALIZED_ROOT_GINDEX), 41);
    }

    #[test]
    fn test_subtree_index_below_depth_sibling_count() {
        for gindex in 1..=1024_u64 {
            assert!(get_subtree_index(gindex) < 2_u64.pow(floorlog2(gindex) as u32));
        }
    }
}
