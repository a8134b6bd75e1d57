// Path: crates/jam-types/src/config/mod.rs

//! Configuration for the protocol constants governing report lifecycle.
//!
//! Bundled into a single struct (rather than left as bare `const`s) so a
//! deployment can override them for test nets while the defaults stay
//! bit-exact with the production values.

use crate::report::identity::{
    ANCHOR_MAX_AGE_SLOTS, MAX_CORE_INDEX, MAX_DEPENDENCIES, MAX_WORK_REPORT_GAS,
    MIN_SERVICE_ITEM_GAS, RECENT_HISTORY_LOOKUP_SLOTS, REPORT_TIMEOUT_SLOTS, SUPER_MAJORITY_DEN,
    SUPER_MAJORITY_NUM,
};
use serde::{Deserialize, Serialize};

/// Selects how a late dispute against a digest that cannot be located in any
/// bucket is handled. Defaults to `SilentNoOp`; `RaiseTargetMissing` is left
/// available for deployments that want stricter replay rejection.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DisputeMissingTargetPolicy {
    /// Tolerate a dispute against an unknown digest; no-op.
    SilentNoOp,
    /// Surface `dispute_target_missing` to the caller.
    RaiseTargetMissing,
}

impl Default for DisputeMissingTargetPolicy {
    fn default() -> Self {
        Self::SilentNoOp
    }
}

/// Protocol constants bundled for the report-lifecycle processors.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ReportsConfig {
    /// Numerator of the super-majority fraction.
    #[serde(default = "default_super_majority_num")]
    pub super_majority_num: u64,
    /// Denominator of the super-majority fraction.
    #[serde(default = "default_super_majority_den")]
    pub super_majority_den: u64,
    /// Slots after which a pending report in ρ is evicted as timed out.
    #[serde(default = "default_report_timeout_slots")]
    pub report_timeout_slots: u64,
    /// Maximum number of dependency digests a single report may declare.
    #[serde(default = "default_max_dependencies")]
    pub max_dependencies: usize,
    /// Maximum total gas a single work-report may have consumed.
    #[serde(default = "default_max_work_report_gas")]
    pub max_work_report_gas: u64,
    /// Minimum gas limit a single work-item must declare.
    #[serde(default = "default_min_service_item_gas")]
    pub min_service_item_gas: u64,
    /// Maximum valid core index.
    #[serde(default = "default_max_core_index")]
    pub max_core_index: u32,
    /// Maximum age, in slots, of a report's refinement-context anchor.
    #[serde(default = "default_anchor_max_age_slots")]
    pub anchor_max_age_slots: u64,
    /// Lookback window, in slots, for recent-history duplicate checks.
    #[serde(default = "default_recent_history_lookup_slots")]
    pub recent_history_lookup_slots: u64,
    /// How to handle a dispute whose target digest is in none of ρ/ω/ξ.
    #[serde(default)]
    pub dispute_missing_target_policy: DisputeMissingTargetPolicy,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            super_majority_num: default_super_majority_num(),
            super_majority_den: default_super_majority_den(),
            report_timeout_slots: default_report_timeout_slots(),
            max_dependencies: default_max_dependencies(),
            max_work_report_gas: default_max_work_report_gas(),
            min_service_item_gas: default_min_service_item_gas(),
            max_core_index: default_max_core_index(),
            anchor_max_age_slots: default_anchor_max_age_slots(),
            recent_history_lookup_slots: default_recent_history_lookup_slots(),
            dispute_missing_target_policy: DisputeMissingTargetPolicy::default(),
        }
    }
}

fn default_super_majority_num() -> u64 {
    SUPER_MAJORITY_NUM
}
fn default_super_majority_den() -> u64 {
    SUPER_MAJORITY_DEN
}
fn default_report_timeout_slots() -> u64 {
    REPORT_TIMEOUT_SLOTS
}
fn default_max_dependencies() -> usize {
    MAX_DEPENDENCIES
}
fn default_max_work_report_gas() -> u64 {
    MAX_WORK_REPORT_GAS
}
fn default_min_service_item_gas() -> u64 {
    MIN_SERVICE_ITEM_GAS
}
fn default_max_core_index() -> u32 {
    MAX_CORE_INDEX
}
fn default_anchor_max_age_slots() -> u64 {
    ANCHOR_MAX_AGE_SLOTS
}
fn default_recent_history_lookup_slots() -> u64 {
    RECENT_HISTORY_LOOKUP_SLOTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_bit_exact_constants() {
        let cfg = ReportsConfig::default();
        assert_eq!(cfg.report_timeout_slots, 100);
        assert_eq!(cfg.max_dependencies, 10);
        assert_eq!(cfg.max_work_report_gas, 200_000);
        assert_eq!(cfg.min_service_item_gas, 10);
        assert_eq!(cfg.max_core_index, 1023);
        assert_eq!(cfg.anchor_max_age_slots, 50);
        assert_eq!(cfg.recent_history_lookup_slots, 200);
    }
}
