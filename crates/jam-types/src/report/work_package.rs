// Path: crates/jam-types/src/report/work_package.rs

use crate::error::ValidationError;
use crate::report::work_item::WorkItem;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Identifies the off-chain service responsible for authorizing a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct AuthorizationServiceDetails {
    /// Host name of the authorizing service.
    pub host: String,
    /// The service identifier, looked up in `GlobalState::service_registry`.
    pub url: String,
    /// The entry-point function invoked to authorize the package.
    pub function: String,
}

/// An author-signed bundle of work-items plus authorization metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct WorkPackage {
    /// Opaque authorization token, non-empty.
    pub authorization_token: String,
    /// Details of the authorizing service.
    pub authorization_service_details: AuthorizationServiceDetails,
    /// Non-empty context string under which the package was refined.
    pub context: String,
    /// Ordered, non-empty sequence of work-items.
    pub work_items: Vec<WorkItem>,
}

impl WorkPackage {
    /// Builds a `WorkPackage`, rejecting empty `work_items` or `authorization_token`.
    pub fn new(
        authorization_token: impl Into<String>,
        authorization_service_details: AuthorizationServiceDetails,
        context: impl Into<String>,
        work_items: Vec<WorkItem>,
    ) -> Result<Self, ValidationError> {
        let authorization_token = authorization_token.into();
        if authorization_token.is_empty() {
            return Err(ValidationError::EmptyField("work_package.authorization_token"));
        }
        let context = context.into();
        if context.is_empty() {
            return Err(ValidationError::EmptyField("work_package.context"));
        }
        if work_items.is_empty() {
            return Err(ValidationError::EmptyField("work_package.work_items"));
        }
        Ok(Self {
            authorization_token,
            authorization_service_details,
            context,
            work_items,
        })
    }
}
