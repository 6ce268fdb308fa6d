//! Single 2-D rasters.

use crate::{
    dtype::decode_all,
    store::{byte_len, SampleStore, StoreMode},
    DataType, Metadata, Sample, StackError,
};
use ndarray::Array2;
use num_traits::AsPrimitive;
use std::path::Path;

/// A 2-D raster in its native sample type.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterData {
    U8(Array2<u8>),
    I16(Array2<i16>),
    I32(Array2<i32>),
    F32(Array2<f32>),
    F64(Array2<f64>),
}

macro_rules! each_raster {
    ($raster:expr, $arr:ident => $body:expr) => {
        match $raster {
            RasterData::U8($arr) => $body,
            RasterData::I16($arr) => $body,
            RasterData::I32($arr) => $body,
            RasterData::F32($arr) => $body,
            RasterData::F64($arr) => $body,
        }
    };
}

impl RasterData {
    pub fn data_type(&self) -> DataType {
        match self {
            Self::U8(_) => DataType::U8,
            Self::I16(_) => DataType::I16,
            Self::I32(_) => DataType::I32,
            Self::F32(_) => DataType::F32,
            Self::F64(_) => DataType::F64,
        }
    }

    /// Returns (rows, columns).
    pub fn dim(&self) -> (usize, usize) {
        each_raster!(self, arr => arr.dim())
    }

    /// Returns a `float32` copy of the samples.
    pub fn to_f32(&self) -> Array2<f32> {
        each_raster!(self, arr => arr.mapv(AsPrimitive::<f32>::as_))
    }

    /// Casts `data` to `data_type`.
    pub fn from_f32(data_type: DataType, data: &Array2<f32>) -> Self {
        match data_type {
            DataType::U8 => Self::U8(data.mapv(u8::from_f32)),
            DataType::I16 => Self::I16(data.mapv(i16::from_f32)),
            DataType::I32 => Self::I32(data.mapv(i32::from_f32)),
            DataType::F32 => Self::F32(data.clone()),
            DataType::F64 => Self::F64(data.mapv(f64::from_f32)),
        }
    }

    pub(crate) fn decode(
        data_type: DataType,
        meta: &Metadata,
        bytes: &[u8],
        shape: (usize, usize),
    ) -> Result<Self, StackError> {
        let endian = meta.byte_order()?;
        let raster = match data_type {
            DataType::U8 => Self::U8(to_array(shape, decode_all(endian, bytes))?),
            DataType::I16 => Self::I16(to_array(shape, decode_all(endian, bytes))?),
            DataType::I32 => Self::I32(to_array(shape, decode_all(endian, bytes))?),
            DataType::F32 => Self::F32(to_array(shape, decode_all(endian, bytes))?),
            DataType::F64 => Self::F64(to_array(shape, decode_all(endian, bytes))?),
        };
        Ok(raster)
    }

    pub(crate) fn encode(&self, meta: &Metadata) -> Result<Vec<u8>, StackError> {
        let endian = meta.byte_order()?;
        Ok(each_raster!(self, arr => {
            let samples: Vec<_> = arr.iter().copied().collect();
            crate::dtype::encode_all(endian, &samples)
        }))
    }
}

fn to_array<T>(shape: (usize, usize), samples: Vec<T>) -> Result<Array2<T>, StackError> {
    let len = samples.len();
    Array2::from_shape_vec(shape, samples).map_err(|_| StackError::ShapeMismatch {
        expected: vec![shape.0, shape.1],
        actual: vec![len],
    })
}

/// Reads the 2-D raster at `path` in its native sample type.
pub fn read_raster<P: AsRef<Path>>(
    path: P,
    mode: StoreMode,
) -> Result<(RasterData, Metadata), StackError> {
    let path = path.as_ref();
    let meta = crate::read_metadata(path)?;
    let kind = meta.file_kind()?;
    if kind.is_cube() {
        return Err(StackError::Format {
            path: path.to_owned(),
            reason: format!("{kind} is a time-series cube, not a 2-D raster"),
        });
    }
    let data_type = meta.data_type()?;
    let shape @ (rows, cols) = meta.dimensions()?;
    let expected = byte_len(path, &[rows, cols], data_type.size())?;
    let store = SampleStore::open(path, mode)?;
    store.check_len(path, expected)?;
    let raster = RasterData::decode(data_type, &meta, store.bytes(), shape)?;
    Ok((raster, meta))
}

#[cfg(test)]
mod tests {
    use super::RasterData;
    use crate::DataType;
    use ndarray::array;

    #[test]
    fn test_f32_round_trip_keeps_native_type() {
        let raster = RasterData::I16(array![[1, -2], [300, 0]]);
        let floats = raster.to_f32();
        assert_eq!(floats, array![[1.0_f32, -2.0], [300.0, 0.0]]);
        let back = RasterData::from_f32(raster.data_type(), &floats);
        assert_eq!(back, raster);
    }

    #[test]
    fn test_from_f32_truncates() {
        let floats = array![[2.9_f32, -0.5], [1.0e4, -1.0]];
        assert_eq!(
            RasterData::from_f32(DataType::U8, &floats),
            RasterData::U8(array![[2, 0], [255, 0]])
        );
        assert_eq!(
            RasterData::from_f32(DataType::I16, &floats),
            RasterData::I16(array![[2, 0], [10000, -1]])
        );
    }

    #[test]
    fn test_dim() {
        let raster = RasterData::F64(ndarray::Array2::zeros((4, 7)));
        assert_eq!(raster.dim(), (4, 7));
        assert_eq!(raster.data_type(), DataType::F64);
    }
}
