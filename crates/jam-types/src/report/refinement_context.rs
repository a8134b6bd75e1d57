// Path: crates/jam-types/src/report/refinement_context.rs

use crate::report::identity::GuarantorId;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The view of chain state a guarantor worked against when producing a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct RefinementContext {
    /// Hash of the anchor block's state root.
    pub anchor_block_root: String,
    /// Height of the anchor block.
    pub anchor_block_number: u64,
    /// BEEFY MMR root at the anchor block.
    pub beefy_mmr_root: String,
    /// Slot at which refinement was performed.
    pub current_slot: u64,
    /// Epoch at which refinement was performed.
    pub current_epoch: u64,
    /// Guarantor roster active for `current_epoch`.
    pub current_guarantors: Vec<GuarantorId>,
    /// Guarantor roster active for `current_epoch - 1`.
    pub previous_guarantors: Vec<GuarantorId>,
}

impl RefinementContext {
    /// Total guarantor count across both rosters (`N` in the super-majority formula).
    pub fn guarantor_count(&self) -> u64 {
        (self.current_guarantors.len() + self.previous_guarantors.len()) as u64
    }
}
