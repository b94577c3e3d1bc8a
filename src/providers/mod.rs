//! Rent sources
//!
//! Each source resolves a [`BaseRent`](crate::models::estimate::BaseRent)
//! for a query. `fallback` never fails and stands in for the others.

pub mod census;
pub mod fallback;
pub mod mock;
pub mod rentcast;
