//! This module provides slot and epoch arithmetic helpers.

/// The slot number of the genesis block.
pub const GENESIS_SLOT: u64 = 0;

/// Returns the epoch at a given `slot`.
///
/// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/phase0/beacon-chain.md#compute_epoch_at_slot)
#[must_use]
pub const fn compute_epoch_at_slot(slots_per_epoch: u64, slot: u64) -> u64 {
    slot / slots_per_epoch
}

/// Returns the first slot of a given `epoch`.
///
/// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/phase0/beacon-chain.md#compute_start_slot_at_epoch)
#[must_use]
pub const fn compute_start_slot_at_epoch(slots_per_epoch: u64, epoch: u64) -> u64 {
    epoch * slots_per_epoch
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_epoch_at_slot() {
        assert_eq!(compute_epoch_at_slot(32, 0), 0);
        assert_eq!(compute_epoch_at_slot(32, 31), 0);
        assert_eq!(compute_epoch_at_slot(32, 32), 1);
        assert_eq!(compute_epoch_at_slot(32, 320_031), 10_000);
    }

    #[test]
    fn test_start_slot_at_epoch() {
        assert_eq!(compute_start_slot_at_epoch(32, 0), GENESIS_SLOT);
        assert_eq!(compute_start_slot_at_epoch(32, 5), 160);
        assert_eq!(
            compute_epoch_at_slot(32, compute_start_slot_at_epoch(32, 1234)),
            1234
        );
    }
}
