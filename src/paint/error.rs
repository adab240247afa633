use crate::storage::StorageError;
use thiserror::Error;

pub type PaintResult<T> = std::result::Result<T, PaintError>;

#[derive(Debug, Error)]
pub enum PaintError {
    #[error("raster rendering failed: {0}")]
    Render(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
