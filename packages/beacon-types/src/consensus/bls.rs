//! This module defines the opaque BLS key and signature containers.
//!
//! Signature verification is performed by an external collaborator; consensus
//! types only carry the bytes and compare them structurally.

use alloy_primitives::FixedBytes;
use serde::{Deserialize, Serialize};

/// The size of a BLS12-381 public key in bytes.
pub const BLS_PUBLIC_KEY_BYTES_LEN: usize = 48;
/// The size of a BLS12-381 signature in bytes.
pub const BLS_SIGNATURE_BYTES_LEN: usize = 96;

/// A BLS12-381 public key.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct BlsPublicKey(pub FixedBytes<BLS_PUBLIC_KEY_BYTES_LEN>);

/// A BLS12-381 signature, not validated for correctness.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct BlsSignature(pub FixedBytes<BLS_SIGNATURE_BYTES_LEN>);
