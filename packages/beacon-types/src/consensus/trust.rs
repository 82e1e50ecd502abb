//! This module defines the trust tiers a block object moves through.
//!
//! A block received from the network starts [`Unverified`], becomes
//! [`SigVerified`] once every signature it carries has been checked, and
//! [`Trusted`] once it is also known to apply cleanly to its parent state.
//! [`MessageTrusted`] sits beside [`SigVerified`]: the bytes are identical,
//! but the guarantee comes from provenance (reload from the client's own
//! validated storage) rather than from re-running signature checks.
//!
//! The tier is a zero-sized type parameter, so every tier of a block shares
//! one layout and moving between tiers costs nothing. Downgrades are always
//! available; upgrades are spelled `assume_*` because the cast itself checks
//! nothing — the caller must have established the guarantee elsewhere.

use core::fmt::Debug;
use core::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::bls::BlsSignature;

/// Type-level record of how much verification has been attested for the block
/// object carrying a signature.
pub trait SignatureTrust: Copy + Debug + Default + Eq {}

/// As received from the network; nothing about the object has been checked.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Unverified;
impl SignatureTrust for Unverified {}

/// Every signature carried by the object is known good: randao reveal,
/// slashing headers, voluntary exits, sync aggregate and the outer block
/// signature. Nested Eth1 deposit signatures are excluded and stay unchecked.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct SigVerified;
impl SignatureTrust for SigVerified {}

/// Byte-identical to [`SigVerified`], but the guarantee comes from where the
/// object was loaded from, not from re-running the signature checks.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct MessageTrusted;
impl SignatureTrust for MessageTrusted {}

/// Signature-verified and known to apply cleanly to its parent state; only
/// produced after full state-transition validation has succeeded.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Trusted;
impl SignatureTrust for Trusted {}

/// A BLS signature tagged with the trust tier `T` of the object carrying it.
///
/// The raw bytes are identical at every tier; only the type-level annotation
/// changes.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct SignatureBytes<T: SignatureTrust> {
    /// The raw signature bytes.
    pub bytes: BlsSignature,
    #[serde(skip)]
    _trust: PhantomData<T>,
}

impl<T: SignatureTrust> SignatureBytes<T> {
    pub(crate) const fn retag<U: SignatureTrust>(self) -> SignatureBytes<U> {
        SignatureBytes {
            bytes: self.bytes,
            _trust: PhantomData,
        }
    }

    /// Drops the trust annotation. Always sound: a stronger guarantee implies
    /// the weaker one.
    #[must_use]
    pub const fn into_unverified(self) -> SignatureBytes<Unverified> {
        self.retag()
    }
}

impl From<BlsSignature> for SignatureBytes<Unverified> {
    fn from(bytes: BlsSignature) -> Self {
        Self {
            bytes,
            _trust: PhantomData,
        }
    }
}

#[cfg(test)]
mod test {
    use alloy_primitives::FixedBytes;

    use super::*;

    #[test]
    fn test_retag_preserves_bytes() {
        let raw = BlsSignature(FixedBytes::from([7_u8; 96]));
        let unverified = SignatureBytes::from(raw);
        let verified: SignatureBytes<SigVerified> = unverified.retag();
        assert_eq!(verified.into_unverified(), unverified);
        assert_eq!(verified.bytes, raw);
    }
}
