use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FxError {
    #[error("unknown effect mode `{0}` (expected field, rising, grid or nebula)")]
    UnknownMode(String),
    #[error("unknown theme `{0}` (expected light or dark)")]
    UnknownTheme(String),
    #[error("unknown notification kind `{0}`")]
    UnknownKind(String),
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
}

pub type FxResult<T> = Result<T, FxError>;
