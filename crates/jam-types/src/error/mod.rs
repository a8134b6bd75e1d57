// Path: crates/jam-types/src/error/mod.rs

//! Error taxonomy for the Reports state machine.
//!
//! Four tagged kinds, not exception types: [`ValidationError`] fails
//! construction of model values before any state is touched.
//! [`ProtocolError`] and [`PvmExecutionError`] are caught inside a processor
//! and converted into a ψ_B insert plus a ψ_O charge; they are not propagated
//! to the caller. [`AuthorizationError`] is reserved for the off-chain
//! refiner and is never raised on-chain.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Malformed inputs at the data-model boundary: missing fields, wrong
/// primitive shape, empty collections where non-empty is required, or a
/// non-positive `gasLimit`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("required field '{0}' is empty")]
    EmptyField(&'static str),
    /// A `WorkItem::gas_limit` was not strictly positive.
    #[error("gas_limit must be > 0")]
    NonPositiveGasLimit,
    /// An `AvailabilitySpec`'s `data_fragments` was 0 or exceeded `total_fragments`.
    #[error("invalid fragment count: data_fragments={data_fragments}, total_fragments={total_fragments}")]
    InvalidFragmentCount {
        /// Declared total fragment count.
        total_fragments: u32,
        /// Declared data (threshold) fragment count.
        data_fragments: u32,
    },
    /// `fragment_hashes.len()` did not equal `total_fragments`.
    #[error("fragment_hashes length mismatch: expected {expected}, got {got}")]
    FragmentHashLenMismatch {
        /// Expected length (`total_fragments`).
        expected: u32,
        /// Actual length of `fragment_hashes`.
        got: usize,
    },
    /// A `core_index` exceeded `MAX_CORE_INDEX`.
    #[error("core_index {0} exceeds MAX_CORE_INDEX")]
    InvalidCoreIndex(u32),
    /// A digest string was not 64 lowercase hex characters.
    #[error("malformed digest: {0}")]
    MalformedDigest(String),
}

impl ErrorCode for ValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyField(_) => "VALIDATION_EMPTY_FIELD",
            Self::NonPositiveGasLimit => "VALIDATION_NON_POSITIVE_GAS_LIMIT",
            Self::InvalidFragmentCount { .. } => "VALIDATION_INVALID_FRAGMENT_COUNT",
            Self::FragmentHashLenMismatch { .. } => "VALIDATION_FRAGMENT_HASH_LEN_MISMATCH",
            Self::InvalidCoreIndex(_) => "VALIDATION_INVALID_CORE_INDEX",
            Self::MalformedDigest(_) => "VALIDATION_MALFORMED_DIGEST",
        }
    }
}

/// The named validation tags of the guarantee processor (§4.2), in the fixed
/// order they are checked. The processor fails fast on the first one matched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// `verify(signable(R), signature, publicKey)` did not hold.
    #[error("bad_signature")]
    BadSignature,
    /// `currentSlot - anchorBlockNumber > ANCHOR_MAX_AGE_SLOTS`.
    #[error("anchor_not_recent: anchor {anchor} is {age} slots old (max {max})")]
    AnchorNotRecent {
        /// The report's anchor block number.
        anchor: u64,
        /// `currentSlot - anchor`.
        age: u64,
        /// `ANCHOR_MAX_AGE_SLOTS`.
        max: u64,
    },
    /// The package's authorization service id is not in `service_registry`.
    #[error("bad_service_id: {0}")]
    BadServiceId(String),
    /// The declared `code_hash` does not match the first work-item's `program_hash`.
    #[error("bad_code_hash: expected {expected}, got {got}")]
    BadCodeHash {
        /// Hash declared at service registration.
        expected: String,
        /// Hash on the work-item actually submitted.
        got: String,
    },
    /// The guarantor's public key is not present in the roster for its report epoch.
    #[error("wrong_assignment: {0} is not an authorized guarantor for its report epoch")]
    WrongAssignment(String),
    /// `core_status[core_index] == engaged`.
    #[error("core_engaged: core {0}")]
    CoreEngaged(u32),
    /// `R.slot > currentSlot`.
    #[error("future_report_slot: slot {slot} > current {current}")]
    FutureReportSlot {
        /// The report's declared slot.
        slot: u64,
        /// The slot the processor is running at.
        current: u64,
    },
    /// `currentSlot - R.slot > REPORT_TIMEOUT_SLOTS`.
    #[error("report_before_last_rotation: slot {slot}, current {current}")]
    ReportBeforeLastRotation {
        /// The report's declared slot.
        slot: u64,
        /// The slot the processor is running at.
        current: u64,
    },
    /// `|dependencies| > MAX_DEPENDENCIES`.
    #[error("too_many_dependencies: {0}")]
    TooManyDependencies(usize),
    /// A declared dependency digest is absent from ξ ∪ ρ ∪ currentBlockDigests.
    #[error("dependency_missing: {0}")]
    DependencyMissing(String),
    /// `gas_used > MAX_WORK_REPORT_GAS`.
    #[error("too_high_work_report_gas: {0}")]
    TooHighWorkReportGas(u64),
    /// A work-item's `gas_limit < MIN_SERVICE_ITEM_GAS`.
    #[error("service_item_gas_too_low: item {item_id} has gas_limit {gas_limit}")]
    ServiceItemGasTooLow {
        /// The offending work-item's id.
        item_id: String,
        /// Its declared gas limit.
        gas_limit: u64,
    },
    /// `digest(R)` is already present in ξ.
    #[error("duplicate_package_in_recent_history")]
    DuplicatePackageInRecentHistory,
    /// ρ[d] aged out before reaching super-majority.
    #[error("timed_out")]
    TimedOut,
}

impl ProtocolError {
    /// The bare tag used as a ψ_B `reason` string (see §4.2.1), without the
    /// variant's interpolated detail. Stable across detail-message changes.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::BadSignature => "bad_signature",
            Self::AnchorNotRecent { .. } => "anchor_not_recent",
            Self::BadServiceId(_) => "bad_service_id",
            Self::BadCodeHash { .. } => "bad_code_hash",
            Self::WrongAssignment(_) => "wrong_assignment",
            Self::CoreEngaged(_) => "core_engaged",
            Self::FutureReportSlot { .. } => "future_report_slot",
            Self::ReportBeforeLastRotation { .. } => "report_before_last_rotation",
            Self::TooManyDependencies(_) => "too_many_dependencies",
            Self::DependencyMissing(_) => "dependency_missing",
            Self::TooHighWorkReportGas(_) => "too_high_work_report_gas",
            Self::ServiceItemGasTooLow { .. } => "service_item_gas_too_low",
            Self::DuplicatePackageInRecentHistory => "duplicate_package_in_recent_history",
            Self::TimedOut => "timed_out",
        }
    }

    /// The ψ_B `reason` string for this failure: `"{tag}:{detail}"`.
    pub fn reason(&self) -> String {
        format!("{}:{}", self.tag(), self)
    }
}

impl ErrorCode for ProtocolError {
    fn code(&self) -> &'static str {
        match self {
            Self::BadSignature => "PROTOCOL_BAD_SIGNATURE",
            Self::AnchorNotRecent { .. } => "PROTOCOL_ANCHOR_NOT_RECENT",
            Self::BadServiceId(_) => "PROTOCOL_BAD_SERVICE_ID",
            Self::BadCodeHash { .. } => "PROTOCOL_BAD_CODE_HASH",
            Self::WrongAssignment(_) => "PROTOCOL_WRONG_ASSIGNMENT",
            Self::CoreEngaged(_) => "PROTOCOL_CORE_ENGAGED",
            Self::FutureReportSlot { .. } => "PROTOCOL_FUTURE_REPORT_SLOT",
            Self::ReportBeforeLastRotation { .. } => "PROTOCOL_REPORT_BEFORE_LAST_ROTATION",
            Self::TooManyDependencies(_) => "PROTOCOL_TOO_MANY_DEPENDENCIES",
            Self::DependencyMissing(_) => "PROTOCOL_DEPENDENCY_MISSING",
            Self::TooHighWorkReportGas(_) => "PROTOCOL_TOO_HIGH_WORK_REPORT_GAS",
            Self::ServiceItemGasTooLow { .. } => "PROTOCOL_SERVICE_ITEM_GAS_TOO_LOW",
            Self::DuplicatePackageInRecentHistory => "PROTOCOL_DUPLICATE_PACKAGE_IN_RECENT_HISTORY",
            Self::TimedOut => "PROTOCOL_TIMED_OUT",
        }
    }
}

/// A `Ψ_A` execution failure, including gas overrun.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PvmExecutionError {
    /// Execution exceeded its gas ceiling.
    #[error("gas exceeded: used {used}, limit {limit}")]
    GasExceeded {
        /// Gas actually consumed before the ceiling was hit.
        used: u64,
        /// The ceiling that was exceeded.
        limit: u64,
    },
    /// The program trapped during execution.
    #[error("execution trapped: {0}")]
    Trapped(String),
    /// A miscellaneous execution failure.
    #[error("pvm execution failed: {0}")]
    Custom(String),
}

impl ErrorCode for PvmExecutionError {
    fn code(&self) -> &'static str {
        match self {
            Self::GasExceeded { .. } => "PVM_GAS_EXCEEDED",
            Self::Trapped(_) => "PVM_TRAPPED",
            Self::Custom(_) => "PVM_CUSTOM_ERROR",
        }
    }
}

/// Reserved for the off-chain refiner/guarantor pipeline. Never raised by the
/// on-chain processors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The off-chain caller was not authorized to perform the refine step.
    #[error("not authorized: {0}")]
    NotAuthorized(String),
}

impl ErrorCode for AuthorizationError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotAuthorized(_) => "AUTHORIZATION_NOT_AUTHORIZED",
        }
    }
}

/// Errors from cryptographic operations (signature verification, hashing).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The signature failed cryptographic verification.
    #[error("signature verification failed")]
    VerificationFailed,
    /// The provided key material is malformed or invalid for the specified algorithm.
    #[error("invalid cryptographic key: {0}")]
    InvalidKey(String),
    /// The provided signature material is malformed or invalid for the specified algorithm.
    #[error("invalid signature format: {0}")]
    InvalidSignature(String),
    /// A hash digest had an unexpected length.
    #[error("invalid hash length: expected {expected}, got {got}")]
    InvalidHashLength {
        /// The expected length in bytes.
        expected: usize,
        /// The actual length in bytes.
        got: usize,
    },
    /// An error occurred during (de)serialization ahead of a crypto operation.
    #[error("deserialization error: {0}")]
    Deserialization(String),
    /// A generic failure in an underlying cryptographic library.
    #[error("cryptographic operation failed: {0}")]
    OperationFailed(String),
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::VerificationFailed => "CRYPTO_VERIFICATION_FAILED",
            Self::InvalidKey(_) => "CRYPTO_INVALID_KEY",
            Self::InvalidSignature(_) => "CRYPTO_INVALID_SIGNATURE",
            Self::InvalidHashLength { .. } => "CRYPTO_INVALID_HASH_LENGTH",
            Self::Deserialization(_) => "CRYPTO_DESERIALIZATION_ERROR",
            Self::OperationFailed(_) => "CRYPTO_OPERATION_FAILED",
        }
    }
}

impl From<dcrypt::Error> for CryptoError {
    fn from(e: dcrypt::Error) -> Self {
        CryptoError::OperationFailed(e.to_string())
    }
}

/// Umbrella error for construction-time failures outside a processor's
/// internal error-to-state-transition conversion (see module docs).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportsError {
    /// A model value failed construction.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    /// A cryptographic operation failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
