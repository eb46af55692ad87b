pub mod bit_pipeline;
pub mod logger;
