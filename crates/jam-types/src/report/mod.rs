// Path: crates/jam-types/src/report/mod.rs

//! The Reports domain model: the value types that flow through the guarantee,
//! dispute, assurance and accumulation processors.

/// Erasure-coding descriptor attached to a work-report.
pub mod availability_spec;
/// Conceptual on-chain world executed against by `Ψ_A`.
pub mod global_state;
/// Guarantor identities and protocol constants.
pub mod identity;
/// The guarantor's view of chain state at refinement time.
pub mod refinement_context;
/// The effect of executing a work-item.
pub mod state_delta;
/// A single program-plus-input execution unit.
pub mod work_item;
/// An atomic, author-signed bundle of work-items.
pub mod work_package;
/// The central guarantor-produced artifact.
pub mod work_report;

pub use availability_spec::AvailabilitySpec;
pub use global_state::{Account, CoreStatus, CoreStatusKind, GlobalState, ServiceRegistration};
pub use identity::{
    ceil_div, super_majority_threshold, GuarantorId, WorkDigest, ANCHOR_MAX_AGE_SLOTS,
    MAX_CORE_INDEX, MAX_DEPENDENCIES, MAX_WORK_REPORT_GAS, MIN_SERVICE_ITEM_GAS,
    RECENT_HISTORY_LOOKUP_SLOTS, REPORT_TIMEOUT_SLOTS, SUPER_MAJORITY_DEN, SUPER_MAJORITY_NUM,
};
pub use refinement_context::RefinementContext;
pub use state_delta::StateDelta;
pub use work_item::WorkItem;
pub use work_package::{AuthorizationServiceDetails, WorkPackage};
pub use work_report::WorkReport;
