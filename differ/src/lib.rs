//! Differencing of InSAR rasters and time series.
//!
//! Two time series are differenced epoch by epoch after their reference
//! date and pixel are reconciled and their dates aligned. Any other
//! rasters are differenced sample by sample, and more than one raster
//! may be subtracted from the first.
//!
//! ```no_run
//! use differ::Diff;
//!
//! let out = Diff::builder()
//!     .primary("timeseries_ERA5_ramp_demErr.h5")
//!     .secondary("../GIANT/Stack/LS-PARAMS.h5")
//!     .force(true)
//!     .build()?
//!     .run()?;
//! # Ok::<(), differ::DiffError>(())
//! ```

mod align;
mod engine;
mod error;
mod naming;
mod reference;
mod units;

pub use crate::{
    align::{align_epochs, EpochAlignment},
    engine::{
        diff_file, diff_rasters, diff_timeseries, subtract_cube, subtract_raster, Diff,
        DiffBuilder, DiffOptions,
    },
    error::DiffError,
    naming::default_output,
    reference::{check_reference, ReferenceCorrection},
    units::CubeFormat,
};
