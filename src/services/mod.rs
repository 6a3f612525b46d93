pub mod dataset;
pub mod relay;
