pub mod sampler;
pub mod types;
