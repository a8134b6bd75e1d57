// Path: crates/jam-types/src/report/global_state.rs

use crate::report::state_delta::StateDelta;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single account record in `GlobalState::accounts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct Account {
    /// Account balance.
    pub balance: u128,
    /// Free-form per-account data.
    pub data: BTreeMap<String, String>,
}

/// Whether a core is free to accept a new report or already has one in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum CoreStatusKind {
    /// The core is free.
    Available,
    /// The core already has a report occupying it.
    Engaged,
}

/// Per-core occupancy tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct CoreStatus {
    /// Current occupancy of the core.
    pub status: CoreStatusKind,
}

impl CoreStatus {
    /// A fresh, unoccupied core.
    pub fn available() -> Self {
        Self {
            status: CoreStatusKind::Available,
        }
    }

    /// Whether the core is currently engaged.
    pub fn is_engaged(&self) -> bool {
        matches!(self.status, CoreStatusKind::Engaged)
    }
}

/// A registered on-chain service, keyed by `service_id` in `GlobalState::service_registry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct ServiceRegistration {
    /// Expected program hash for work-items routed to this service.
    pub code_hash: Option<String>,
    /// Identity of the account that owns this service registration.
    pub owner: String,
}

/// The conceptual on-chain world that `Ψ_A` executes work-items against.
///
/// `GlobalState` is plain data: the accumulation processor clones it (or a
/// journal over it) before applying a report's deltas, so a failed report's
/// partial effects can be rolled back without touching the committed copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct GlobalState {
    /// Account balances and per-account data, keyed by account id.
    pub accounts: BTreeMap<String, Account>,
    /// Per-core occupancy, keyed by core index.
    pub core_status: BTreeMap<u32, CoreStatus>,
    /// Registered services, keyed by service id.
    pub service_registry: BTreeMap<String, ServiceRegistration>,
    /// Free-form key/value data mutated by `StateDelta::data`.
    pub data: BTreeMap<String, String>,
    /// An append-only log of `StateDelta::log` lines, in commit order.
    pub log: Vec<String>,
}

impl GlobalState {
    /// Applies `delta`'s present fields to a clone of `self`, leaving `self`
    /// untouched. Callers commit the result only after every work-item in a
    /// report has succeeded.
    pub fn apply(&self, delta: &StateDelta) -> GlobalState {
        let mut next = self.clone();
        if let Some(accounts) = &delta.accounts {
            next.accounts.extend(accounts.clone());
        }
        if let Some(data) = &delta.data {
            next.data.extend(data.clone());
        }
        if let Some(line) = &delta.log {
            next.log.push(line.clone());
        }
        next
    }
}
