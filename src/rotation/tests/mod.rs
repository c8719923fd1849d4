//! Unit tests for the rotation module.
//!
//! Tests are organised by concept: identifiers and the ordered index, the
//! rotation aggregate, the precondition pipeline, and the services built
//! on top of it.

mod index_tests;
