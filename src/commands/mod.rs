//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - start: Start the HTTP service
//! - estimate: One-shot estimate for a single location
//! - compare: Side-by-side estimates for several locations
//! - test: Test configuration validity
//! - config: Configuration display and validation

pub mod compare;
pub mod config;
pub mod estimate;
pub mod start;
pub mod test;
