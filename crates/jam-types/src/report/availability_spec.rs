// Path: crates/jam-types/src/report/availability_spec.rs

use crate::error::ValidationError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Erasure-coding descriptor for a work-report's availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct AvailabilitySpec {
    /// Total number of erasure-coded fragments.
    pub total_fragments: u32,
    /// Number of fragments required to reconstruct the data. `1 <= data_fragments <= total_fragments`.
    pub data_fragments: u32,
    /// Hashes of each fragment, one per `total_fragments`.
    pub fragment_hashes: Vec<String>,
}

impl AvailabilitySpec {
    /// Builds an `AvailabilitySpec`, checking the fragment-count invariants.
    pub fn new(
        total_fragments: u32,
        data_fragments: u32,
        fragment_hashes: Vec<String>,
    ) -> Result<Self, ValidationError> {
        if data_fragments == 0 || data_fragments > total_fragments {
            return Err(ValidationError::InvalidFragmentCount {
                total_fragments,
                data_fragments,
            });
        }
        if fragment_hashes.len() != total_fragments as usize {
            return Err(ValidationError::FragmentHashLenMismatch {
                expected: total_fragments,
                got: fragment_hashes.len(),
            });
        }
        Ok(Self {
            total_fragments,
            data_fragments,
            fragment_hashes,
        })
    }
}
