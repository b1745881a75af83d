pub mod classifier;
pub mod distribution;
pub mod group_key;
pub mod operations;
pub mod processor;
pub mod report;
pub mod stats;
pub mod tagging;
