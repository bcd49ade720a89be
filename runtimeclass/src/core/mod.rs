//! Deterministic, pure validation logic for runtime classes.
//!
//! Core modules are free of I/O. They borrow their inputs and return owned
//! violation lists suitable for direct assertions in tests.

pub mod identifier;
pub mod immutability;
pub mod topology;
