// Path: crates/jam-types/src/report/work_report.rs

use crate::codec;
use crate::error::{CryptoError, ValidationError};
use crate::report::availability_spec::AvailabilitySpec;
use crate::report::identity::{is_well_formed_digest, GuarantorId, WorkDigest, MAX_CORE_INDEX};
use crate::report::refinement_context::RefinementContext;
use crate::report::work_package::WorkPackage;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The guarantor's post-refinement artifact: package, execution output,
/// availability spec and signature.
///
/// `digest(report)` (see [`WorkReport::digest`]) is a pure function of the
/// report's content excluding `guarantor_signature` and `guarantor_public_key`:
/// two reports over identical content, signed by two different guarantors,
/// share a digest. This is what lets the ρ merge step in the guarantee
/// processor treat independent endorsements of the same underlying work as
/// the same key; the signing guarantor's identity is supplied alongside the
/// signature as the verification key, not folded into the signed content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct WorkReport {
    /// The package this report attests to having refined.
    pub work_package: WorkPackage,
    /// The chain view under which refinement was performed.
    pub refinement_context: RefinementContext,
    /// Opaque output of the PVM refinement.
    pub pvm_output: String,
    /// Gas consumed producing `pvm_output`.
    pub gas_used: u64,
    /// Erasure-coding descriptor, if the package's output was made available.
    pub availability_spec: Option<AvailabilitySpec>,
    /// Hex-encoded Ed25519 signature over [`WorkReport::signable`].
    pub guarantor_signature: String,
    /// Hex-encoded Ed25519 public key identity of the signing guarantor.
    pub guarantor_public_key: GuarantorId,
    /// Index of the core this report was produced for.
    pub core_index: u32,
    /// Slot at which the report was produced.
    pub slot: u64,
    /// Digests of reports this one depends on.
    pub dependencies: Vec<WorkDigest>,
}

/// A `WorkReport` with the signature and signer identity cleared, ready for
/// canonical encoding prior to signing or hashing.
#[derive(Serialize, Deserialize, Encode, Decode)]
struct SignableWorkReport<'a> {
    work_package: &'a WorkPackage,
    refinement_context: &'a RefinementContext,
    pvm_output: &'a str,
    gas_used: u64,
    availability_spec: &'a Option<AvailabilitySpec>,
    core_index: u32,
    slot: u64,
    dependencies: &'a [WorkDigest],
}

impl WorkReport {
    /// Builds a `WorkReport`, rejecting a `core_index` beyond `MAX_CORE_INDEX`
    /// or a declared dependency that isn't a well-formed 64-char hex digest.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        work_package: WorkPackage,
        refinement_context: RefinementContext,
        pvm_output: impl Into<String>,
        gas_used: u64,
        availability_spec: Option<AvailabilitySpec>,
        guarantor_signature: impl Into<String>,
        guarantor_public_key: impl Into<GuarantorId>,
        core_index: u32,
        slot: u64,
        dependencies: Vec<WorkDigest>,
    ) -> Result<Self, ValidationError> {
        if core_index > MAX_CORE_INDEX {
            return Err(ValidationError::InvalidCoreIndex(core_index));
        }
        for dependency in &dependencies {
            if !is_well_formed_digest(dependency) {
                return Err(ValidationError::MalformedDigest(dependency.clone()));
            }
        }
        Ok(Self {
            work_package,
            refinement_context,
            pvm_output: pvm_output.into(),
            gas_used,
            availability_spec,
            guarantor_signature: guarantor_signature.into(),
            guarantor_public_key: guarantor_public_key.into(),
            core_index,
            slot,
            dependencies,
        })
    }

    fn signable_view(&self) -> SignableWorkReport<'_> {
        SignableWorkReport {
            work_package: &self.work_package,
            refinement_context: &self.refinement_context,
            pvm_output: &self.pvm_output,
            gas_used: self.gas_used,
            availability_spec: &self.availability_spec,
            core_index: self.core_index,
            slot: self.slot,
            dependencies: &self.dependencies,
        }
    }

    /// The canonical byte encoding of this report with `guarantor_signature`
    /// and `guarantor_public_key` omitted. This is what gets signed (against
    /// a specific guarantor's key, supplied separately to `verify`), and what
    /// gets hashed into the digest.
    pub fn signable(&self) -> Result<Vec<u8>, CryptoError> {
        codec::to_bytes_canonical(&self.signable_view())
            .map_err(CryptoError::Deserialization)
    }

    /// `SHA-256(signable(self))`, rendered as 64-char lowercase hex.
    ///
    /// Invariant under signature/signer replacement: two reports differing
    /// only in `guarantor_signature` and/or `guarantor_public_key` produce
    /// the same digest.
    pub fn digest(&self) -> Result<WorkDigest, CryptoError> {
        use dcrypt::algorithms::hash::sha2::Sha256 as DcryptSha256;
        use dcrypt::algorithms::hash::HashFunction as DcryptHashFunction;
        use dcrypt::algorithms::ByteSerializable;

        let bytes = self.signable()?;
        let raw = DcryptSha256::digest(&bytes)
            .map_err(dcrypt::Error::from)
            .map_err(CryptoError::from)?;
        Ok(hex::encode(raw.to_bytes()))
    }
}
