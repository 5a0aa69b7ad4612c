//! Test helpers module
//!
//! Utilities shared by the integration tests: an application context over the
//! in-memory store, a store that fails on demand, document fixtures, and a
//! mock Firestore REST server.
#![allow(dead_code)]

pub mod faulty_store;
pub mod firestore_mock;
pub mod test_context;
pub mod test_data;

pub use faulty_store::*;
pub use firestore_mock::*;
pub use test_context::*;
pub use test_data::*;
