//! This module defines [`LightClientError`].

use alloy_primitives::B256;

/// Error types for light client verification
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum LightClientError {
    /// Invalid branch length error
    #[error("invalid merkle branch length, expected {expected} but found {found}")]
    InvalidBranchLength {
        /// Expected length
        expected: usize,
        /// Found length
        found: usize,
    },

    /// Invalid merkle branch error
    #[error(transparent)]
    InvalidMerkleBranch(#[from] Box<InvalidMerkleBranch>), // boxed to decrease enum size

    /// Pre-activation header with a non-default execution payload header
    #[error("execution payload header must be default before the fork activates")]
    ExecutionPayloadMustBeDefault,

    /// Pre-activation header with a non-default execution branch
    #[error("execution branch must be default before the fork activates")]
    ExecutionBranchMustBeDefault,
}

#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
#[error("invalid merkle branch \
    (leaf: {leaf}, branch: [{branch}], \
    depth: {depth}, index: {index}, root: {root}, found: {found})",
    branch = .branch.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
)]
/// Error details for invalid Merkle branch verification
pub struct InvalidMerkleBranch {
    /// Leaf hash
    pub leaf: B256,
    /// Branch hashes
    pub branch: Vec<B256>,
    /// Tree depth
    pub depth: usize,
    /// Leaf index
    pub index: u64,
    /// Expected root hash
    pub root: B256,
    /// Computed root hash
    pub found: B256,
}

impl LightClientError {
    /// Constructs a [`LightClientError::InvalidMerkleBranch`] variant.
    #[must_use]
    pub fn invalid_merkle_branch(
        leaf: B256,
        branch: Vec<B256>,
        depth: usize,
        index: u64,
        root: B256,
        found: B256,
    ) -> Self {
        Self::InvalidMerkleBranch(Box::new(InvalidMerkleBranch {
            leaf,
            branch,
            depth,
            index,
            root,
            found,
        }))
    }
}
