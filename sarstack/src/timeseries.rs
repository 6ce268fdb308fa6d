//! Time-series cubes.

use crate::{
    dtype::decode_all,
    store::{byte_len, SampleStore, StoreMode},
    DataType, Endian, FileKind, Metadata, StackError,
};
use ndarray::{Array2, Array3};
use std::path::{Path, PathBuf};

/// A time-series cube of one 2-D layer per acquisition date.
pub struct TimeSeries {
    path: PathBuf,

    metadata: Metadata,

    kind: FileKind,

    /// Acquisition dates, one per layer, in storage order.
    date_list: Vec<String>,

    /// Number of (rows, columns) in each layer.
    dimensions: (usize, usize),

    data_type: DataType,

    endian: Endian,

    samples: SampleStore,
}

impl TimeSeries {
    /// Opens the cube at `path` and validates its layout.
    pub fn open<P: AsRef<Path>>(path: P, mode: StoreMode) -> Result<Self, StackError> {
        let path = path.as_ref().to_owned();
        let metadata = crate::read_metadata(&path)?;
        let kind = metadata.file_kind()?;
        if !kind.is_cube() {
            return Err(StackError::Format {
                path,
                reason: format!("{kind} is not a time-series cube"),
            });
        }
        let data_type = metadata.data_type()?;
        if !data_type.is_float() {
            return Err(StackError::Format {
                path,
                reason: format!("time-series samples must be floating point, not {data_type}"),
            });
        }
        let endian = metadata.byte_order()?;
        let date_list = metadata.date_list()?;
        let dimensions @ (rows, cols) = metadata.dimensions()?;
        let expected = byte_len(&path, &[date_list.len(), rows, cols], data_type.size())?;
        let samples = SampleStore::open(&path, mode)?;
        samples.check_len(&path, expected)?;
        Ok(Self {
            path,
            metadata,
            kind,
            date_list,
            dimensions,
            data_type,
            endian,
            samples,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn kind(&self) -> &FileKind {
        &self.kind
    }

    pub fn date_list(&self) -> &[String] {
        &self.date_list
    }

    pub fn num_date(&self) -> usize {
        self.date_list.len()
    }

    /// Returns the (rows, columns) of each layer.
    pub fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    /// Returns the whole cube.
    pub fn read(&self) -> Result<Array3<f64>, StackError> {
        let (rows, cols) = self.dimensions;
        let mut cube = Array3::zeros((self.num_date(), rows, cols));
        for (idx, mut layer) in cube.outer_iter_mut().enumerate() {
            layer.assign(&self.layer(idx)?);
        }
        Ok(cube)
    }

    /// Returns only the layers of `epochs`, in that order.
    pub fn read_epochs<S: AsRef<str>>(&self, epochs: &[S]) -> Result<Array3<f64>, StackError> {
        let (rows, cols) = self.dimensions;
        let mut cube = Array3::zeros((epochs.len(), rows, cols));
        for (epoch, mut layer) in epochs.iter().zip(cube.outer_iter_mut()) {
            let epoch = epoch.as_ref();
            let idx = self
                .date_list
                .iter()
                .position(|d| d == epoch)
                .ok_or_else(|| StackError::MissingEpoch(epoch.to_string()))?;
            layer.assign(&self.layer(idx)?);
        }
        Ok(cube)
    }
}

/// Private API
impl TimeSeries {
    fn layer(&self, idx: usize) -> Result<Array2<f64>, StackError> {
        let (rows, cols) = self.dimensions;
        let layer_len = rows * cols * self.data_type.size();
        let bytes = &self.samples.bytes()[idx * layer_len..(idx + 1) * layer_len];
        let samples: Vec<f64> = match self.data_type {
            DataType::F64 => decode_all(self.endian, bytes),
            _ => decode_all::<f32>(self.endian, bytes)
                .into_iter()
                .map(f64::from)
                .collect(),
        };
        let len = samples.len();
        Array2::from_shape_vec((rows, cols), samples).map_err(|_| StackError::ShapeMismatch {
            expected: vec![rows, cols],
            actual: vec![len],
        })
    }
}

/// Reads the cube at `path`, restricted to `epochs` when given.
pub fn read_cube<P: AsRef<Path>>(
    path: P,
    epochs: Option<&[String]>,
    mode: StoreMode,
) -> Result<(Array3<f64>, Metadata), StackError> {
    let ts = TimeSeries::open(path, mode)?;
    let data = match epochs {
        Some(epochs) => ts.read_epochs(epochs)?,
        None => ts.read()?,
    };
    Ok((data, ts.metadata))
}
