use sarstack::{FileKind, StackError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("missing required parameters")]
    Builder,

    #[error("no file to subtract")]
    NoSecondary,

    #[error("output file name is needed for more than 2 files input")]
    MissingOutputName,

    #[error("input files are not the same file type: {primary} and {secondary}")]
    IncompatibleTypes {
        primary: FileKind,
        secondary: FileKind,
    },

    #[error("only 2 files subtraction is supported for time series file, {0} input")]
    UnsupportedArity(usize),

    #[error(
        "secondary file does not contain dates {missing:?}; \
         to enforce the differencing anyway, use the force option"
    )]
    UnalignedEpochs { missing: Vec<String> },

    #[error("reference date {0} is not shared by both time series")]
    MissingReferenceEpoch(String),

    #[error("reference pixel ({y}, {x}) outside of {rows}x{cols} grid")]
    ReferencePixel {
        y: usize,
        x: usize,
        rows: usize,
        cols: usize,
    },

    #[error("shape mismatch, expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("{0}")]
    Stack(#[from] StackError),
}
