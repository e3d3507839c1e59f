use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("missing {field} count")]
    MissingHeader { field: &'static str },
    #[error("line {line}: invalid {field} count {value:?}")]
    InvalidHeader {
        field: &'static str,
        line: usize,
        value: String,
    },
    #[error("matrix of {rows}x{cols} cells is too large to address")]
    Oversized { rows: usize, cols: usize },
    #[error("line {line}: invalid integer {token:?}")]
    InvalidValue { line: usize, token: String },
    #[error("line {line}: expected {expected} values, got {got}")]
    RowLength {
        line: usize,
        expected: usize,
        got: usize,
    },
    #[error("expected {expected} rows, got {got}")]
    RowCount { expected: usize, got: usize },
    #[error("matrix error: {0}")]
    Matrix(#[from] mx_core::MatrixError),
}

pub type Result<T> = std::result::Result<T, FileError>;
