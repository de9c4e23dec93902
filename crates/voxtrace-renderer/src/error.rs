use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Canvas must be at least 1x1 pixels, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },
}
