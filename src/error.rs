use thiserror::Error;

/// Failures when handing the finished buffer to the image sink.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Creating, writing or flushing the output failed.
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    /// The encoder rejected the buffer.
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}
