use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("world dimension mismatch: {left:?} against {right:?}")]
    DimensionMismatch {
        left: (u32, u32),
        right: (u32, u32),
    },

    #[error("invalid world dimensions {width}x{height}")]
    EmptyDimension { width: u32, height: u32 },

    #[error("unexpected character {found:?} in pattern at line {line}, column {column}")]
    UnexpectedChar {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("unknown pattern {0:?}")]
    UnknownPattern(String),

    #[error("density must lie within [0, 1], got {0}")]
    InvalidDensity(f64),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
