//! Differencing of rasters and time series.

use crate::{
    align_epochs, check_reference, default_output, CubeFormat, DiffError, EpochAlignment,
    ReferenceCorrection,
};
use log::{debug, info};
use ndarray::{s, Array3, Axis, Zip};
use sarstack::{
    read_metadata, read_raster, write_cube, write_raster, FileKind, MetadataSource, RasterData,
    StoreMode, TimeSeries,
};
use std::path::{Path, PathBuf};

/// Options shared by every differencing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Difference time series on their shared dates only instead of
    /// failing when the secondary lacks some of the primary's dates.
    pub force: bool,

    /// How input files are accessed.
    pub store_mode: StoreMode,
}

/// A validated differencing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    /// File subtracted from.
    primary: PathBuf,

    /// Files subtracted, in order.
    secondaries: Vec<PathBuf>,

    /// Resolved output path.
    output: PathBuf,

    options: DiffOptions,
}

impl Diff {
    pub fn builder() -> DiffBuilder {
        DiffBuilder::default()
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Computes the difference and writes it to [`Diff::output`].
    ///
    /// Every failure happens before anything is written.
    pub fn run(&self) -> Result<PathBuf, DiffError> {
        info!(
            "{} - {:?} --> {}",
            self.primary.display(),
            self.secondaries,
            self.output.display()
        );
        let secondary = self.secondaries.first().ok_or(DiffError::NoSecondary)?;

        let meta1 = read_metadata(&self.primary)?;
        let meta2 = read_metadata(secondary)?;
        let (kind1, kind2) = (meta1.file_kind()?, meta2.file_kind()?);
        info!("input files are: {kind1} and {kind2}");

        if kind1 == FileKind::TimeSeries {
            let format = CubeFormat::from_kind(&kind2).ok_or_else(|| {
                DiffError::IncompatibleTypes {
                    primary: kind1.clone(),
                    secondary: kind2.clone(),
                }
            })?;
            if self.secondaries.len() > 1 {
                return Err(DiffError::UnsupportedArity(self.secondaries.len() + 1));
            }
            let data = diff_timeseries(&self.primary, secondary, format, &self.options)?;
            info!("writing >>> {}", self.output.display());
            write_cube(&data, &self.output, MetadataSource::Reference(&self.primary))?;
        } else {
            let data = diff_rasters(&self.primary, &self.secondaries, self.options.store_mode)?;
            info!("writing >>> {}", self.output.display());
            write_raster(&data, &self.output, MetadataSource::Explicit(&meta1))?;
        }

        Ok(self.output.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiffBuilder {
    primary: Option<PathBuf>,

    secondaries: Vec<PathBuf>,

    /// Defaults to `<primary>_diff_<secondary>` when unset.
    output: Option<PathBuf>,

    options: DiffOptions,
}

impl DiffBuilder {
    pub fn primary<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.primary = Some(path.into());
        self
    }

    pub fn secondary<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.secondaries.push(path.into());
        self
    }

    pub fn secondaries<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.secondaries.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn output<P: Into<PathBuf>>(mut self, path: Option<P>) -> Self {
        self.output = path.map(Into::into);
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.options.force = force;
        self
    }

    pub fn store_mode(mut self, mode: StoreMode) -> Self {
        self.options.store_mode = mode;
        self
    }

    pub fn build(&self) -> Result<Diff, DiffError> {
        match (&self.primary, self.secondaries.is_empty()) {
            (Some(primary), false) => {
                let output = match &self.output {
                    Some(output) => output.clone(),
                    None => default_output(primary, &self.secondaries)?,
                };
                Ok(Diff {
                    primary: primary.clone(),
                    secondaries: self.secondaries.clone(),
                    output,
                    options: self.options,
                })
            }
            _ => Err(DiffError::Builder),
        }
    }
}

/// Subtracts `secondaries` from `primary` and writes the result to
/// `output`, or to the default output name when `None`.
pub fn diff_file<P: AsRef<Path>>(
    primary: P,
    secondaries: &[PathBuf],
    output: Option<&Path>,
    options: &DiffOptions,
) -> Result<PathBuf, DiffError> {
    Diff::builder()
        .primary(primary.as_ref())
        .secondaries(secondaries)
        .output(output)
        .force(options.force)
        .store_mode(options.store_mode)
        .build()?
        .run()
}

/// Returns `primary - secondary` for two time-series files.
pub fn diff_timeseries<P: AsRef<Path>, S: AsRef<Path>>(
    primary: P,
    secondary: S,
    format: CubeFormat,
    options: &DiffOptions,
) -> Result<Array3<f64>, DiffError> {
    let ts1 = TimeSeries::open(primary, options.store_mode)?;
    let ts2 = TimeSeries::open(secondary, options.store_mode)?;
    if ts1.dimensions() != ts2.dimensions() {
        let ((r1, c1), (r2, c2)) = (ts1.dimensions(), ts2.dimensions());
        return Err(DiffError::ShapeMismatch {
            expected: vec![r1, c1],
            actual: vec![r2, c2],
        });
    }

    let correction = check_reference(ts1.metadata(), ts2.metadata())?;
    let alignment = align_epochs(ts1.date_list(), ts2.date_list(), options.force)?;

    let scale = format.unit_scale();
    debug!("reading {} epochs of {:?}, scale {scale}", alignment.shared.len(), ts2.path());
    let mut data2 = ts2.read_epochs(&alignment.shared)?;
    data2.mapv_inplace(|v| v * scale);

    let data1 = ts1.read()?;
    subtract_cube(data1, data2, &alignment, &correction)
}

/// Subtracts the aligned, not yet re-referenced, `secondary` from
/// `primary`.
///
/// `secondary` holds one layer per shared epoch. Layers of `primary`
/// excluded by `alignment` are returned unchanged, and samples equal to
/// zero in `primary` stay zero.
pub fn subtract_cube(
    mut primary: Array3<f64>,
    mut secondary: Array3<f64>,
    alignment: &EpochAlignment,
    correction: &ReferenceCorrection,
) -> Result<Array3<f64>, DiffError> {
    let (num_date, rows, cols) = primary.dim();
    let num_included = alignment.included.iter().filter(|&&inc| inc).count();
    if num_date != alignment.included.len() || num_included != alignment.shared.len() {
        return Err(DiffError::ShapeMismatch {
            expected: vec![num_date, alignment.shared.len()],
            actual: vec![alignment.included.len(), num_included],
        });
    }
    if secondary.dim() != (alignment.shared.len(), rows, cols) {
        let (n2, r2, c2) = secondary.dim();
        return Err(DiffError::ShapeMismatch {
            expected: vec![alignment.shared.len(), rows, cols],
            actual: vec![n2, r2, c2],
        });
    }

    if let Some(date) = &correction.date {
        let idx = alignment
            .shared
            .iter()
            .position(|d| d == date)
            .ok_or_else(|| DiffError::MissingReferenceEpoch(date.clone()))?;
        let reference = secondary.index_axis(Axis(0), idx).to_owned();
        for mut layer in secondary.outer_iter_mut() {
            layer -= &reference;
        }
    }

    if let Some((y, x)) = correction.pixel {
        if y >= rows || x >= cols {
            return Err(DiffError::ReferencePixel { y, x, rows, cols });
        }
        let reference = secondary.slice(s![.., y, x]).to_owned();
        for (mut layer, r) in secondary.outer_iter_mut().zip(reference.iter()) {
            layer -= *r;
        }
    }

    // Zero marks "no observation" and must survive the subtraction.
    let nodata = primary.mapv(|v| v == 0.0);

    let mut shared = secondary.outer_iter();
    for (mut layer, &included) in primary.outer_iter_mut().zip(&alignment.included) {
        if included {
            if let Some(layer2) = shared.next() {
                layer -= &layer2;
            }
        }
    }

    Zip::from(&mut primary).and(&nodata).for_each(|v, &nodata| {
        if nodata {
            *v = 0.0;
        }
    });
    Ok(primary)
}

/// Returns `primary - secondaries[0] - secondaries[1] - ...` in the
/// primary's sample type.
pub fn diff_rasters<P: AsRef<Path>>(
    primary: &Path,
    secondaries: &[P],
    mode: StoreMode,
) -> Result<RasterData, DiffError> {
    let (mut data, _) = read_raster(primary, mode)?;
    for path in secondaries {
        let (data2, _) = read_raster(path, mode)?;
        data = subtract_raster(&data, &data2)?;
    }
    Ok(data)
}

/// Returns `lhs - rhs`, computed in `float32` and cast back to the
/// sample type of `lhs`.
pub fn subtract_raster(lhs: &RasterData, rhs: &RasterData) -> Result<RasterData, DiffError> {
    if lhs.dim() != rhs.dim() {
        let ((r1, c1), (r2, c2)) = (lhs.dim(), rhs.dim());
        return Err(DiffError::ShapeMismatch {
            expected: vec![r1, c1],
            actual: vec![r2, c2],
        });
    }
    let diff = lhs.to_f32() - rhs.to_f32();
    Ok(RasterData::from_f32(lhs.data_type(), &diff))
}
