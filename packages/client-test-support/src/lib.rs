//! Client test support utilities
//!
//! This crate provides utilities shared by the client's integration tests,
//! currently the unified logging initialization.

pub mod logging;
