// Path: crates/jam-types/src/report/work_item.rs

use crate::error::ValidationError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A single program-plus-input execution unit with a gas ceiling.
///
/// Constructed only via [`WorkItem::new`], which enforces the non-empty-id
/// and positive-gas invariants at the data-model boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct WorkItem {
    /// Identifier of the work item within its package. Non-empty.
    pub id: String,
    /// Hex-encoded hash of the program to execute.
    pub program_hash: String,
    /// Opaque input payload handed to the program.
    pub input_data: String,
    /// Gas ceiling for this item's execution. Must be > 0.
    pub gas_limit: u64,
}

impl WorkItem {
    /// Builds a `WorkItem`, rejecting malformed field combinations.
    pub fn new(
        id: impl Into<String>,
        program_hash: impl Into<String>,
        input_data: impl Into<String>,
        gas_limit: u64,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyField("work_item.id"));
        }
        if gas_limit == 0 {
            return Err(ValidationError::NonPositiveGasLimit);
        }
        Ok(Self {
            id,
            program_hash: program_hash.into(),
            input_data: input_data.into(),
            gas_limit,
        })
    }
}
