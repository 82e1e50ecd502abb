//! This module defines the beacon block of the current fork, parameterized
//! by the trust tier established for it so far.
//!
//! All tiers of a block share one layout; the tier only annotates the
//! signature positions. Moving between tiers is a move of the same value
//! under a different type, so a pipeline can deserialize once and
//! reinterpret as verification stages complete instead of copying or
//! re-checking.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use super::{
    bls::{BlsPublicKey, BlsSignature},
    light_client_header::BeaconBlockHeader,
    state::{Checkpoint, Eth1Data},
    sync_committee::SyncAggregate,
    trust::{
        MessageTrusted, SignatureBytes, SignatureTrust, SigVerified, Trusted, Unverified,
    },
    wrappers::{WrappedBloom, WrappedBytes},
};

/// The depth of the eth1 deposit contract's merkle tree.
pub const DEPOSIT_CONTRACT_TREE_DEPTH: usize = 32;

/// A beacon block paired with the proposer's signature over it.
///
/// The signature's trust annotation always matches the message's tier: a
/// block is never partially attested.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[serde(bound = "")]
#[allow(clippy::module_name_repetitions)]
pub struct SignedBeaconBlock<T: SignatureTrust = Unverified> {
    /// The block being signed.
    pub message: BeaconBlock<T>,
    /// The proposer's signature over the block root.
    pub signature: SignatureBytes<T>,
}

/// A beacon block at trust tier `T`.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[serde(bound = "")]
#[allow(clippy::module_name_repetitions)]
pub struct BeaconBlock<T: SignatureTrust = Unverified> {
    /// The slot to which this block corresponds
    #[serde_as(as = "DisplayFromStr")]
    pub slot: u64,
    /// The index of validator in validator registry
    #[serde_as(as = "DisplayFromStr")]
    pub proposer_index: u64,
    /// The signing merkle root of the parent `BeaconBlock`
    pub parent_root: B256,
    /// The tree hash merkle root of the `BeaconState` for the `BeaconBlock`
    pub state_root: B256,
    /// The block's payload of operations.
    pub body: BeaconBlockBody<T>,
}

/// The body of a beacon block at trust tier `T`.
///
/// The tier annotates the randao reveal and the sync aggregate directly.
/// Signatures nested inside the operation lists stay raw bytes at every
/// tier; [`SigVerified`] attests to them collectively. Eth1 deposit
/// signatures are the exception and are never attested (see
/// [`SigVerified`](super::trust::SigVerified)).
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[serde(bound = "")]
#[allow(clippy::module_name_repetitions)]
pub struct BeaconBlockBody<T: SignatureTrust = Unverified> {
    /// The proposer's reveal of the slot's randao contribution.
    pub randao_reveal: SignatureBytes<T>,
    /// The proposer's eth1 vote.
    pub eth1_data: Eth1Data,
    /// Arbitrary proposer-chosen data.
    pub graffiti: B256,
    /// Evidence of proposers signing conflicting blocks.
    pub proposer_slashings: Vec<ProposerSlashing>,
    /// Evidence of validators attesting to conflicting checkpoints.
    pub attester_slashings: Vec<AttesterSlashing>,
    /// Attestations included by the proposer.
    pub attestations: Vec<Attestation>,
    /// Deposits from the eth1 deposit contract.
    pub deposits: Vec<Deposit>,
    /// Validators voluntarily exiting the registry.
    pub voluntary_exits: Vec<SignedVoluntaryExit>,
    /// The previous slot's sync committee aggregate.
    pub sync_aggregate: SyncAggregate<T>,
    /// The execution-layer block carried by this beacon block.
    pub execution_payload: ExecutionPayload,
    /// Withdrawal-credential rewrites requested by validators.
    pub bls_to_execution_changes: Vec<SignedBlsToExecutionChange>,
}

impl<T: SignatureTrust> SignedBeaconBlock<T> {
    fn retag<U: SignatureTrust>(self) -> SignedBeaconBlock<U> {
        SignedBeaconBlock {
            message: self.message.retag(),
            signature: self.signature.retag(),
        }
    }

    /// Drops the trust annotation. Always sound: a stronger guarantee
    /// implies the weaker one.
    #[must_use]
    pub fn into_unverified(self) -> SignedBeaconBlock<Unverified> {
        self.retag()
    }
}

impl<T: SignatureTrust> BeaconBlock<T> {
    fn retag<U: SignatureTrust>(self) -> BeaconBlock<U> {
        BeaconBlock {
            slot: self.slot,
            proposer_index: self.proposer_index,
            parent_root: self.parent_root,
            state_root: self.state_root,
            body: self.body.retag(),
        }
    }

    /// Drops the trust annotation.
    #[must_use]
    pub fn into_unverified(self) -> BeaconBlock<Unverified> {
        self.retag()
    }

    /// Returns the block's header: the block with its body replaced by the
    /// body's tree hash root.
    #[must_use]
    pub const fn to_header(&self, body_root: B256) -> BeaconBlockHeader {
        BeaconBlockHeader {
            slot: self.slot,
            proposer_index: self.proposer_index,
            parent_root: self.parent_root,
            state_root: self.state_root,
            body_root,
        }
    }
}

impl<T: SignatureTrust> BeaconBlockBody<T> {
    fn retag<U: SignatureTrust>(self) -> BeaconBlockBody<U> {
        BeaconBlockBody {
            randao_reveal: self.randao_reveal.retag(),
            eth1_data: self.eth1_data,
            graffiti: self.graffiti,
            proposer_slashings: self.proposer_slashings,
            attester_slashings: self.attester_slashings,
            attestations: self.attestations,
            deposits: self.deposits,
            voluntary_exits: self.voluntary_exits,
            sync_aggregate: self.sync_aggregate.retag(),
            execution_payload: self.execution_payload,
            bls_to_execution_changes: self.bls_to_execution_changes,
        }
    }
}

impl SignedBeaconBlock<Unverified> {
    /// Reinterprets the block as signature-verified.
    ///
    /// The cast checks nothing. The caller must have verified every
    /// signature the block carries (deposits excluded) beforehand.
    #[must_use]
    pub fn assume_sig_verified(self) -> SignedBeaconBlock<SigVerified> {
        self.retag()
    }

    /// Reinterprets the block as trusted on provenance, for blocks reloaded
    /// from storage that only holds already-validated objects.
    ///
    /// The cast checks nothing; the provenance claim is the caller's.
    #[must_use]
    pub fn assume_message_trusted(self) -> SignedBeaconBlock<MessageTrusted> {
        self.retag()
    }

    /// Reinterprets the block as fully trusted.
    ///
    /// The cast checks nothing. The caller must have verified the block's
    /// signatures and applied it cleanly to its parent state beforehand.
    #[must_use]
    pub fn assume_trusted(self) -> SignedBeaconBlock<Trusted> {
        self.retag()
    }
}

impl SignedBeaconBlock<SigVerified> {
    /// Reinterprets the block as fully trusted once state-transition
    /// validation has succeeded. The cast itself checks nothing.
    #[must_use]
    pub fn assume_trusted(self) -> SignedBeaconBlock<Trusted> {
        self.retag()
    }
}

impl SignedBeaconBlock<MessageTrusted> {
    /// Reinterprets the block as fully trusted once state-transition
    /// validation has succeeded. The cast itself checks nothing.
    #[must_use]
    pub fn assume_trusted(self) -> SignedBeaconBlock<Trusted> {
        self.retag()
    }
}

impl SignedBeaconBlock<Trusted> {
    /// Weakens a fully trusted block to signature-verified. Always sound.
    #[must_use]
    pub fn into_sig_verified(self) -> SignedBeaconBlock<SigVerified> {
        self.retag()
    }

    /// Weakens a fully trusted block to provenance-trusted. Always sound.
    #[must_use]
    pub fn into_message_trusted(self) -> SignedBeaconBlock<MessageTrusted> {
        self.retag()
    }
}

impl BeaconBlock<Unverified> {
    /// Reinterprets the block as signature-verified. See
    /// [`SignedBeaconBlock::assume_sig_verified`].
    #[must_use]
    pub fn assume_sig_verified(self) -> BeaconBlock<SigVerified> {
        self.retag()
    }

    /// Reinterprets the block as trusted on provenance. See
    /// [`SignedBeaconBlock::assume_message_trusted`].
    #[must_use]
    pub fn assume_message_trusted(self) -> BeaconBlock<MessageTrusted> {
        self.retag()
    }

    /// Reinterprets the block as fully trusted. See
    /// [`SignedBeaconBlock::assume_trusted`].
    #[must_use]
    pub fn assume_trusted(self) -> BeaconBlock<Trusted> {
        self.retag()
    }
}

impl BeaconBlock<Trusted> {
    /// Weakens a fully trusted block to signature-verified.
    #[must_use]
    pub fn into_sig_verified(self) -> BeaconBlock<SigVerified> {
        self.retag()
    }

    /// Weakens a fully trusted block to provenance-trusted.
    #[must_use]
    pub fn into_message_trusted(self) -> BeaconBlock<MessageTrusted> {
        self.retag()
    }
}

/// Evidence that one proposer signed two conflicting headers for a slot.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct ProposerSlashing {
    /// The first of the conflicting signed headers.
    pub signed_header_1: SignedBeaconBlockHeader,
    /// The second of the conflicting signed headers.
    pub signed_header_2: SignedBeaconBlockHeader,
}

/// A beacon block header paired with the proposer's signature.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct SignedBeaconBlockHeader {
    /// The header being signed.
    pub message: BeaconBlockHeader,
    /// The proposer's signature over the header root.
    pub signature: BlsSignature,
}

/// Evidence that a set of validators attested to conflicting checkpoints.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct AttesterSlashing {
    /// The first of the conflicting attestations.
    pub attestation_1: IndexedAttestation,
    /// The second of the conflicting attestations.
    pub attestation_2: IndexedAttestation,
}

/// An attestation with its participants listed by validator index.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct IndexedAttestation {
    /// The indices of the attesting validators, ascending.
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub attesting_indices: Vec<u64>,
    /// The attested data.
    pub data: AttestationData,
    /// The aggregate signature of the attesting validators.
    pub signature: BlsSignature,
}

/// An attestation with its participants listed as committee bits.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct Attestation {
    /// The participation bits of the attesting committee.
    pub aggregation_bits: Bytes,
    /// The attested data.
    pub data: AttestationData,
    /// The aggregate signature of the attesting validators.
    pub signature: BlsSignature,
}

/// The vote carried by an attestation.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct AttestationData {
    /// The slot the attestation is for.
    #[serde_as(as = "DisplayFromStr")]
    pub slot: u64,
    /// The index of the attesting committee within the slot.
    #[serde_as(as = "DisplayFromStr")]
    pub index: u64,
    /// The root of the block being attested to.
    pub beacon_block_root: B256,
    /// The source checkpoint of the FFG vote.
    pub source: Checkpoint,
    /// The target checkpoint of the FFG vote.
    pub target: Checkpoint,
}

/// A deposit from the eth1 deposit contract, with its inclusion proof.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct Deposit {
    /// The merkle branch proving inclusion in the deposit tree, with the
    /// mixed-in deposit count as its last entry
    /// ([`DEPOSIT_CONTRACT_TREE_DEPTH`] + 1 entries).
    pub proof: Vec<B256>,
    /// The deposited data.
    pub data: DepositData,
}

/// The data a depositor submitted to the deposit contract.
///
/// Its signature is checked by deposit processing itself, never by block
/// signature verification, because an invalid deposit signature makes the
/// deposit void rather than the block invalid.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct DepositData {
    /// The public key of the validator being deposited for.
    pub pubkey: BlsPublicKey,
    /// The withdrawal credential to register.
    pub withdrawal_credentials: B256,
    /// The deposited amount, in gwei.
    #[serde_as(as = "DisplayFromStr")]
    pub amount: u64,
    /// The depositor's signature over the deposit data.
    pub signature: BlsSignature,
}

/// A request by a validator to exit the registry.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct VoluntaryExit {
    /// The earliest epoch the exit may be processed in.
    #[serde_as(as = "DisplayFromStr")]
    pub epoch: u64,
    /// The index of the exiting validator.
    #[serde_as(as = "DisplayFromStr")]
    pub validator_index: u64,
}

/// A voluntary exit paired with the validator's signature.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct SignedVoluntaryExit {
    /// The exit being signed.
    pub message: VoluntaryExit,
    /// The exiting validator's signature.
    pub signature: BlsSignature,
}

/// A request to rewrite a BLS withdrawal credential to an execution address.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct BlsToExecutionChange {
    /// The index of the validator whose credential is rewritten.
    #[serde_as(as = "DisplayFromStr")]
    pub validator_index: u64,
    /// The BLS key the current credential was derived from.
    pub from_bls_pubkey: BlsPublicKey,
    /// The execution address withdrawals will go to.
    pub to_execution_address: Address,
}

/// A credential rewrite paired with the owning key's signature.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct SignedBlsToExecutionChange {
    /// The rewrite being signed.
    pub message: BlsToExecutionChange,
    /// The signature of the BLS key the credential was derived from.
    pub signature: BlsSignature,
}

/// The full execution-layer block carried inside a beacon block.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct ExecutionPayload {
    /// The parent hash of the execution block
    pub parent_hash: B256,
    /// Block fee recipient
    pub fee_recipient: Address,
    /// The state root
    pub state_root: B256,
    /// The root of the receipts trie
    pub receipts_root: B256,
    /// The logs bloom filter
    pub logs_bloom: WrappedBloom,
    /// The previous Randao value, used to compute the randomness on the execution layer.
    pub prev_randao: B256,
    /// The block number of the execution payload
    #[serde_as(as = "DisplayFromStr")]
    pub block_number: u64,
    /// Execution block gas limit
    #[serde_as(as = "DisplayFromStr")]
    pub gas_limit: u64,
    /// Execution block gas used
    #[serde_as(as = "DisplayFromStr")]
    pub gas_used: u64,
    /// The timestamp of the execution payload
    #[serde_as(as = "DisplayFromStr")]
    pub timestamp: u64,
    /// The extra data of the execution payload
    pub extra_data: WrappedBytes,
    /// Block base fee per gas
    pub base_fee_per_gas: U256,
    /// The block hash
    pub block_hash: B256,
    /// The raw transactions of the block.
    pub transactions: Vec<WrappedBytes>,
    /// The withdrawals of the block.
    pub withdrawals: Vec<Withdrawal>,
}

/// A withdrawal processed by the execution layer.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Withdrawal {
    /// The chain-wide index of the withdrawal.
    #[serde_as(as = "DisplayFromStr")]
    pub index: u64,
    /// The index of the validator being withdrawn from.
    #[serde_as(as = "DisplayFromStr")]
    pub validator_index: u64,
    /// The execution address receiving the funds.
    pub address: Address,
    /// The withdrawn amount, in gwei.
    #[serde_as(as = "DisplayFromStr")]
    pub amount: u64,
}

#[cfg(test)]
mod test {
    use alloy_primitives::FixedBytes;

    use super::*;

    fn sample_block() -> SignedBeaconBlock {
        let mut block = SignedBeaconBlock::default();
        block.signature = SignatureBytes::from(BlsSignature(FixedBytes::from([3_u8; 96])));
        block.message.slot = 6_400_000;
        block.message.proposer_index = 321;
        block.message.body.graffiti = B256::repeat_byte(0x42);
        block.message.body.randao_reveal =
            SignatureBytes::from(BlsSignature(FixedBytes::from([5_u8; 96])));
        block.message.body.voluntary_exits.push(SignedVoluntaryExit {
            message: VoluntaryExit {
                epoch: 200_000,
                validator_index: 77,
            },
            signature: BlsSignature(FixedBytes::from([8_u8; 96])),
        });
        block
    }

    #[test]
    fn test_cast_round_trip_is_identity() {
        let block = sample_block();
        let round_tripped = block.clone().assume_sig_verified().into_unverified();
        assert_eq!(round_tripped, block);

        let via_trusted = block
            .clone()
            .assume_trusted()
            .into_message_trusted()
            .into_unverified();
        assert_eq!(via_trusted, block);
    }

    #[test]
    fn test_upgrade_casts_preserve_fields() {
        let block = sample_block();
        let trusted = block.clone().assume_sig_verified().assume_trusted();
        assert_eq!(trusted.signature.bytes, block.signature.bytes);
        assert_eq!(trusted.message.slot, block.message.slot);
        assert_eq!(
            trusted.message.body.voluntary_exits,
            block.message.body.voluntary_exits
        );
    }

    #[test]
    fn test_to_header_replaces_body_with_root() {
        let block = sample_block();
        let body_root = B256::repeat_byte(0x99);
        let header = block.message.to_header(body_root);
        assert_eq!(header.slot, block.message.slot);
        assert_eq!(header.proposer_index, block.message.proposer_index);
        assert_eq!(header.body_root, body_root);
    }

    #[test]
    fn test_block_serde_round_trip() {
        let block = sample_block();
        let json = serde_json::to_string(&block).unwrap();
        let decoded: SignedBeaconBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, block);
    }
}
