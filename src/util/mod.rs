//! Utilities shared by tests and binaries

pub mod testing;
