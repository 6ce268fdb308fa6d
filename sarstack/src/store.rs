use crate::StackError;
use log::debug;
use memmap2::Mmap;
use std::{
    fs::{self, File},
    io::ErrorKind,
    path::Path,
};

/// How to access sample data.
///
/// The trade off between loading a stack into memory versus memory
/// mapping it depends on how much of the file is needed; when only a
/// few epochs of a large cube are read, mapping avoids touching the
/// rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreMode {
    /// Read the whole file into memory.
    #[default]
    InMem,

    /// Memory map file contents.
    MemMap,
}

/// Raw bytes of a stack data file.
pub(crate) enum SampleStore {
    InMem(Box<[u8]>),
    MemMap(Mmap),
}

impl SampleStore {
    pub(crate) fn open(path: &Path, mode: StoreMode) -> Result<Self, StackError> {
        debug!("opening {path:?} ({mode:?})");
        let not_found = |e: std::io::Error| {
            if e.kind() == ErrorKind::NotFound {
                StackError::NotFound(path.to_owned())
            } else {
                StackError::Io(e)
            }
        };
        match mode {
            StoreMode::InMem => {
                let bytes = fs::read(path).map_err(not_found)?;
                Ok(Self::InMem(bytes.into_boxed_slice()))
            }
            StoreMode::MemMap => {
                let file = File::open(path).map_err(not_found)?;
                let mmap = unsafe { Mmap::map(&file)? };
                Ok(Self::MemMap(mmap))
            }
        }
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        match self {
            Self::InMem(bytes) => bytes,
            Self::MemMap(mmap) => mmap.as_ref(),
        }
    }

    /// Fails unless the store holds exactly `expected` bytes.
    pub(crate) fn check_len(&self, path: &Path, expected: usize) -> Result<(), StackError> {
        let actual = self.bytes().len();
        if actual == expected {
            Ok(())
        } else {
            Err(StackError::Format {
                path: path.to_owned(),
                reason: format!("expected {expected} bytes of samples, found {actual}"),
            })
        }
    }
}

/// Returns the byte length of `dims` samples of `size` bytes each.
///
/// Dimensions come straight from the sidecar, so a product that does
/// not fit in `usize` is a format error.
pub(crate) fn byte_len(path: &Path, dims: &[usize], size: usize) -> Result<usize, StackError> {
    dims.iter()
        .try_fold(size, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| StackError::Format {
            path: path.to_owned(),
            reason: format!("dimensions overflow: {dims:?} x {size} bytes"),
        })
}
