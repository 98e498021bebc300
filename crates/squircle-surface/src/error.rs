use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Canvas dimensions must be positive and within limits.
    #[error("invalid canvas dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("PNG encoding error: {0}")]
    Png(String),
}
