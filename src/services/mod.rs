pub mod aggregator;
pub mod github;
pub mod writer;
