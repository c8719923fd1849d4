//! Rota: staffing core for on-call rotations.
//!
//! This crate tracks rotations, the users who staff them and the skills
//! those users hold, and the tasks filed against each rotation. Assigning a
//! task checks each candidate against an eligibility policy unless the
//! caller forces the assignment.
//!
//! # Architecture
//!
//! Rota follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and user lookup
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`rotation`]: Rotations, preconditions, and task assignment
//! - [`telemetry`]: Structured logging setup

pub mod rotation;
pub mod telemetry;
