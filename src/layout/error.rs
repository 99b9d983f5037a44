use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid layout state: {0}")]
    InvalidLayoutState(String),
    #[error("node not found: {0}")]
    NotFound(String),
}
