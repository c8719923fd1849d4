//! Rotation staffing: rotations, their members and tasks, and assignment.
//!
//! Every operation runs against a request-scoped
//! [`context::DomainContext`]. Operations declare the state they need as a
//! list of [`context::Precondition`]s; the context resolves each one lazily,
//! caches what it loads, and fails fast on the first violated invariant
//! before any write reaches the store. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The request context and its preconditions in [`context`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod context;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
