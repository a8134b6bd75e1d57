// Path: crates/jam-types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # jam-types
//!
//! Core data structures, error types and configuration for the Reports
//! state-transition machinery: `WorkItem`, `WorkPackage`, `RefinementContext`,
//! `AvailabilitySpec`, `WorkReport`, `StateDelta`, `GlobalState`, and the
//! canonical binary codec used for hashing and signing.
//!
//! ## Architectural role
//!
//! As the base crate, `jam-types` has minimal dependencies and is a
//! dependency of every other crate in the workspace. This keeps the
//! dependency graph acyclic and gives every component a single, canonical
//! definition of the domain model and its error taxonomy.

/// A crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::ReportsError> = std::result::Result<T, E>;

/// The canonical, deterministic binary codec for consensus-critical values.
pub mod codec;
/// Configuration for the protocol constants governing report lifecycle.
pub mod config;
/// A unified set of all error types used across the Reports machinery.
pub mod error;
/// Constants for well-known top-level keys used in state snapshots.
pub mod keys;
/// A prelude containing useful extension traits like `OptionExt`.
pub mod prelude;
/// The Reports domain model.
pub mod report;

pub use report::*;
