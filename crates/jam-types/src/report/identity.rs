// Path: crates/jam-types/src/report/identity.rs

//! Guarantor identity and the protocol constants that govern report lifecycle.

use serde::{Deserialize, Serialize};

/// A guarantor's public key, rendered as a hex string.
///
/// Kept as an opaque string rather than a fixed-size array: the signing suite
/// is Ed25519 today but the wire format (hex identity) is what the rest of
/// the pipeline keys off of, so no point committing to a byte layout here.
pub type GuarantorId = String;

/// A 32-byte SHA-256 digest, rendered as a 64-character lowercase hex string.
///
/// This is the canonical key type for all five `OnchainState` buckets.
pub type WorkDigest = String;

/// Numerator of the super-majority fraction.
pub const SUPER_MAJORITY_NUM: u64 = 2;
/// Denominator of the super-majority fraction.
pub const SUPER_MAJORITY_DEN: u64 = 3;

/// Slots after which a pending report in ρ is evicted as timed out.
pub const REPORT_TIMEOUT_SLOTS: u64 = 100;
/// Maximum number of dependency digests a single report may declare.
pub const MAX_DEPENDENCIES: usize = 10;
/// Maximum total gas a single work-report may have consumed.
pub const MAX_WORK_REPORT_GAS: u64 = 200_000;
/// Minimum gas limit a single work-item must declare.
pub const MIN_SERVICE_ITEM_GAS: u64 = 10;
/// Maximum valid core index.
pub const MAX_CORE_INDEX: u32 = 1023;
/// Maximum age, in slots, of a report's refinement-context anchor.
pub const ANCHOR_MAX_AGE_SLOTS: u64 = 50;
/// Lookback window, in slots, for recent-history duplicate checks.
pub const RECENT_HISTORY_LOOKUP_SLOTS: u64 = 200;

/// Returns `true` iff `digest` is exactly 64 lowercase hex characters, the
/// canonical rendering of a SHA-256 digest used throughout `OnchainState`.
pub fn is_well_formed_digest(digest: &str) -> bool {
    digest.len() == 64 && digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
}

/// Computes `ceil(n * num / den)` using integer arithmetic only.
pub fn ceil_div(n: u64, num: u64, den: u64) -> u64 {
    (n * num + den - 1) / den
}

/// Computes the super-majority endorsement threshold for a roster of size `n`
/// under the bit-exact default fraction. Callers that need to honor a
/// deployment's overridden `ReportsConfig` fraction should call `ceil_div`
/// directly with `config.super_majority_num`/`super_majority_den`.
pub fn super_majority_threshold(n: u64) -> u64 {
    ceil_div(n, SUPER_MAJORITY_NUM, SUPER_MAJORITY_DEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_rounds_up() {
        assert_eq!(super_majority_threshold(3), 2);
        assert_eq!(super_majority_threshold(2), 2);
        assert_eq!(super_majority_threshold(1), 1);
        assert_eq!(super_majority_threshold(0), 0);
    }

    #[test]
    fn digest_format_rejects_wrong_length_and_uppercase() {
        assert!(is_well_formed_digest(&"a".repeat(64)));
        assert!(!is_well_formed_digest(&"a".repeat(63)));
        assert!(!is_well_formed_digest(&"A".repeat(64)));
        assert!(!is_well_formed_digest("not-hex-at-all"));
    }
}
