pub mod census;
pub mod estimate;
pub mod query;
pub mod rentcast;
