//! Newtype wrappers giving [`TreeHash`] to field types the crate does not
//! cover out of the box.

use alloy_primitives::{Bloom, Bytes};
use serde::{Deserialize, Serialize};
use tree_hash::{MerkleHasher, TreeHash, BYTES_PER_CHUNK};

/// A 2048-bit logs bloom filter, merkleized as a fixed-length byte vector.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct WrappedBloom(pub Bloom);

impl TreeHash for WrappedBloom {
    fn tree_hash_type() -> tree_hash::TreeHashType {
        tree_hash::TreeHashType::List
    }

    fn tree_hash_packed_encoding(&self) -> tree_hash::PackedEncoding {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_root(&self) -> tree_hash::Hash256 {
        let leaves = self.0.len().div_ceil(BYTES_PER_CHUNK);

        let mut hasher = MerkleHasher::with_leaves(leaves);
        for item in &self.0 {
            hasher.write(item.tree_hash_root()[..1].as_ref()).unwrap();
        }

        hasher.finish().unwrap()
    }
}

/// A variable-length byte list, merkleized with its length mixed in.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct WrappedBytes(pub Bytes);

impl TreeHash for WrappedBytes {
    fn tree_hash_type() -> tree_hash::TreeHashType {
        tree_hash::TreeHashType::List
    }

    fn tree_hash_packed_encoding(&self) -> tree_hash::PackedEncoding {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_root(&self) -> tree_hash::Hash256 {
        let leaves = self.0.len().div_ceil(BYTES_PER_CHUNK);

        let mut hasher = MerkleHasher::with_leaves(leaves);
        for item in &self.0 {
            hasher.write(item.tree_hash_root()[..1].as_ref()).unwrap();
        }

        tree_hash::mix_in_length(&hasher.finish().unwrap(), self.0.len())
    }
}

impl AsRef<[u8]> for WrappedBytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}
