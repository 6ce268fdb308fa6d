//! InSAR raster and time-series stack files.
//!
//! A stack file is a flat binary file of row-major samples next to a
//! ROI_PAC style sidecar (`<file>.rsc`) holding `KEY VALUE` metadata.
//! Single rasters store `LENGTH × WIDTH` samples; time-series cubes
//! store one such layer per entry of their `DATE_LIST`.
//!
//! # References
//!
//! 1. [ROI_PAC `.rsc` attributes](https://github.com/insarlab/MintPy/blob/main/docs/api/attributes.md)
//! 1. [GIAnT time-series products](http://earthdef.caltech.edu/projects/giant/wiki)

mod dtype;
mod error;
pub mod metadata;
mod raster;
mod store;
mod timeseries;
mod writer;

pub use crate::{
    dtype::{DataType, Endian, Sample},
    error::StackError,
    metadata::{FileKind, Metadata},
    raster::{read_raster, RasterData},
    store::StoreMode,
    timeseries::{read_cube, TimeSeries},
    writer::{write_cube, write_raster, MetadataSource},
};
use std::path::Path;

/// Returns the metadata of the stack file at `path`.
///
/// Both the data file and its sidecar must exist.
pub fn read_metadata<P: AsRef<Path>>(path: P) -> Result<Metadata, StackError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(StackError::NotFound(path.to_owned()));
    }
    Metadata::from_file(path)
}
