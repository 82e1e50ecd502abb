//! This module implements merkle branch verification.

use alloy_primitives::B256;
use sha2::{Digest, Sha256};

use crate::{ensure, error::LightClientError};

// https://github.com/ethereum/consensus-specs/blob/dev/specs/phase0/beacon-chain.md#is_valid_merkle_branch
/// Verifies that `leaf` sits at position `index` among the nodes `depth`
/// levels below `root`, by folding the branch's sibling hashes into a
/// candidate root.
///
/// A branch whose length differs from `depth` is a verification failure, not
/// a caller error: branches arrive from untrusted input.
///
/// # Errors
/// Returns an error if the branch length is wrong or the recomputed root
/// does not match.
pub fn validate_merkle_branch(
    leaf: B256,
    branch: &[B256],
    depth: usize,
    index: u64,
    root: B256,
) -> Result<(), LightClientError> {
    ensure!(
        branch.len() == depth,
        LightClientError::InvalidBranchLength {
            expected: depth,
            found: branch.len(),
        }
    );

    let mut value = leaf;
    for (i, branch_node) in branch.iter().enumerate() {
        let mut hasher = Sha256::new();
        // the i-th bit of the index says whether the proven node is the
        // right (1) or left (0) child at that level
        if (index >> i) & 1 == 1 {
            hasher.update(branch_node);
            hasher.update(value);
        } else {
            hasher.update(value);
            hasher.update(branch_node);
        }

        value = B256::from_slice(&hasher.finalize()[..]);
    }

    ensure!(
        value == root,
        LightClientError::invalid_merkle_branch(leaf, branch.to_vec(), depth, index, root, value)
    );

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn hash_pair(left: B256, right: B256) -> B256 {
        let mut hasher = Sha256::new();
        hasher.update(left);
        hasher.update(right);
        B256::from_slice(&hasher.finalize()[..])
    }

    /// Builds a perfect tree over `leaves` and returns its root together with
    /// the branch for the leaf at `index`.
    fn tree_root_and_branch(leaves: &[B256], index: usize) -> (B256, Vec<B256>) {
        assert!(leaves.len().is_power_of_two());

        let mut branch = vec![];
        let mut level: Vec<B256> = leaves.to_vec();
        let mut position = index;
        while level.len() > 1 {
            branch.push(level[position ^ 1]);
            level = level
                .chunks(2)
                .map(|pair| hash_pair(pair[0], pair[1]))
                .collect();
            position /= 2;
        }

        (level[0], branch)
    }

    fn leaves() -> Vec<B256> {
        (0..16_u8).map(B256::repeat_byte).collect()
    }

    #[test]
    fn test_valid_branch() {
        for index in [0_usize, 5, 9, 15] {
            let (root, branch) = tree_root_and_branch(&leaves(), index);
            validate_merkle_branch(leaves()[index], &branch, 4, index as u64, root).unwrap();
        }
    }

    #[test]
    fn test_tampered_branch_fails() {
        let (root, mut branch) = tree_root_and_branch(&leaves(), 9);
        branch[2] = B256::repeat_byte(0xff);

        let err = validate_merkle_branch(leaves()[9], &branch, 4, 9, root).unwrap_err();
        assert!(matches!(err, LightClientError::InvalidMerkleBranch(_)));
    }

    #[test]
    fn test_wrong_leaf_fails() {
        let (root, branch) = tree_root_and_branch(&leaves(), 9);
        let err =
            validate_merkle_branch(B256::repeat_byte(0xaa), &branch, 4, 9, root).unwrap_err();
        assert!(matches!(err, LightClientError::InvalidMerkleBranch(_)));
    }

    #[test]
    fn test_wrong_length_fails() {
        let (root, branch) = tree_root_and_branch(&leaves(), 9);
        let err = validate_merkle_branch(leaves()[9], &branch[..3], 4, 9, root).unwrap_err();
        assert_eq!(
            err,
            LightClientError::InvalidBranchLength {
                expected: 4,
                found: 3,
            }
        );
    }
}
