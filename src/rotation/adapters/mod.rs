//! Adapters for the rotation ports.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryEntityStore`]: key-value entity store backed by a
//!   process-local map
//! - [`memory::InMemoryUserDirectory`]: profile directory backed by a
//!   process-local map

pub mod memory;
