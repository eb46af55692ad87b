use thiserror::Error;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Invalid mapping configuration: {0}")]
    InvalidConfig(String),

    #[error("Input contains no bits to map")]
    EmptyInput,

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),

    #[error("Pixel worker failed: {0}")]
    WorkerFailure(String),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to encode PNG image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MappingError>;
