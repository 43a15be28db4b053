use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("drawing failed: {0}")]
    Backend(String),

    #[error("bundled chart font could not be loaded")]
    Font,

    #[error("unsupported image destination '{0}': expected a .png path")]
    UnsupportedFormat(String),
}

impl ChartError {
    pub(crate) fn backend(err: impl std::fmt::Display) -> Self {
        ChartError::Backend(err.to_string())
    }
}
