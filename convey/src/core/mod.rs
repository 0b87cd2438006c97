//! Deterministic, pure logic shared by the scope engine.
//!
//! Core modules never touch user closures beyond the single unwind boundary in
//! [`capture`]. They operate on the in-memory scope tree and return
//! deterministic outputs suitable for tests.

pub mod capture;
pub mod selector;
pub mod tree;
pub mod types;
