pub mod aggregator;
pub mod stats_node;
