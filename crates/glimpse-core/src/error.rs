use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlimpseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid SER file: {0}")]
    InvalidSer(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Unsupported color mode: {0}")]
    UnsupportedColorMode(String),

    #[error("Source ended early: needed {expected} frames, only {available} available")]
    StreamExhausted { expected: usize, available: usize },

    #[error("Director error: {0}")]
    Director(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Empty frame sequence")]
    EmptySequence,
}

pub type Result<T> = std::result::Result<T, GlimpseError>;
