//! Sample types and byte orders.

use crate::StackError;
use byteorder::{BigEndian as BE, ByteOrder, LittleEndian as LE};
use num_traits::{AsPrimitive, Zero};
use std::{fmt, mem::size_of, str::FromStr};

/// Numeric type of the samples stored in a stack file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    U8,
    I16,
    I32,
    #[default]
    F32,
    F64,
}

impl DataType {
    /// Returns the size of one sample in bytes.
    pub fn size(self) -> usize {
        match self {
            Self::U8 => size_of::<u8>(),
            Self::I16 => size_of::<i16>(),
            Self::I32 => size_of::<i32>(),
            Self::F32 => size_of::<f32>(),
            Self::F64 => size_of::<f64>(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::U8 => "uint8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl FromStr for DataType {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, StackError> {
        match s {
            "uint8" => Ok(Self::U8),
            "int16" => Ok(Self::I16),
            "int32" => Ok(Self::I32),
            "float32" => Ok(Self::F32),
            "float64" => Ok(Self::F64),
            other => Err(StackError::InvalidValue {
                key: "DATA_TYPE".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte order of the samples in a stack file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

impl Endian {
    pub fn name(self) -> &'static str {
        match self {
            Self::Little => "little-endian",
            Self::Big => "big-endian",
        }
    }
}

impl FromStr for Endian {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, StackError> {
        match s {
            "little-endian" => Ok(Self::Little),
            "big-endian" => Ok(Self::Big),
            other => Err(StackError::InvalidValue {
                key: "BYTE_ORDER".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// A primitive sample that can live in a stack file.
///
/// Conversions follow Rust `as` semantics: float to integer truncates
/// toward zero and saturates at the integer bounds.
pub trait Sample:
    Copy + Zero + fmt::Debug + AsPrimitive<f32> + AsPrimitive<f64> + 'static
{
    const DATA_TYPE: DataType;

    /// Decodes `src` into `dst`; `src` must hold exactly `dst.len()`
    /// samples.
    fn decode(endian: Endian, src: &[u8], dst: &mut [Self]);

    /// Encodes `src` into `dst`; `dst` must hold exactly `src.len()`
    /// samples.
    fn encode(endian: Endian, src: &[Self], dst: &mut [u8]);

    fn from_f32(v: f32) -> Self;

    fn from_f64(v: f64) -> Self;
}

impl Sample for u8 {
    const DATA_TYPE: DataType = DataType::U8;

    fn decode(_endian: Endian, src: &[u8], dst: &mut [Self]) {
        dst.copy_from_slice(src);
    }

    fn encode(_endian: Endian, src: &[Self], dst: &mut [u8]) {
        dst.copy_from_slice(src);
    }

    fn from_f32(v: f32) -> Self {
        v.as_()
    }

    fn from_f64(v: f64) -> Self {
        v.as_()
    }
}

macro_rules! impl_sample {
    ($t:ty, $dt:expr, $read:ident, $write:ident) => {
        impl Sample for $t {
            const DATA_TYPE: DataType = $dt;

            fn decode(endian: Endian, src: &[u8], dst: &mut [Self]) {
                match endian {
                    Endian::Little => LE::$read(src, dst),
                    Endian::Big => BE::$read(src, dst),
                }
            }

            fn encode(endian: Endian, src: &[Self], dst: &mut [u8]) {
                match endian {
                    Endian::Little => LE::$write(src, dst),
                    Endian::Big => BE::$write(src, dst),
                }
            }

            fn from_f32(v: f32) -> Self {
                v.as_()
            }

            fn from_f64(v: f64) -> Self {
                v.as_()
            }
        }
    };
}

impl_sample!(i16, DataType::I16, read_i16_into, write_i16_into);
impl_sample!(i32, DataType::I32, read_i32_into, write_i32_into);
impl_sample!(f32, DataType::F32, read_f32_into, write_f32_into);
impl_sample!(f64, DataType::F64, read_f64_into, write_f64_into);

/// Decodes every sample in `bytes`.
pub(crate) fn decode_all<T: Sample>(endian: Endian, bytes: &[u8]) -> Vec<T> {
    let mut samples = vec![T::zero(); bytes.len() / size_of::<T>()];
    T::decode(endian, bytes, &mut samples);
    samples
}

/// Encodes `samples` into a freshly allocated buffer.
pub(crate) fn encode_all<T: Sample>(endian: Endian, samples: &[T]) -> Vec<u8> {
    let mut bytes = vec![0_u8; samples.len() * size_of::<T>()];
    T::encode(endian, samples, &mut bytes);
    bytes
}

#[cfg(test)]
mod tests {
    use super::{decode_all, encode_all, DataType, Endian, Sample};

    #[test]
    fn test_data_type_names() {
        for dt in [
            DataType::U8,
            DataType::I16,
            DataType::I32,
            DataType::F32,
            DataType::F64,
        ] {
            assert_eq!(dt.name().parse::<DataType>().unwrap(), dt);
        }
        assert!("complex64".parse::<DataType>().is_err());
    }

    #[test]
    fn test_big_endian_layout() {
        let bytes = encode_all(Endian::Big, &[1_i16, -2]);
        assert_eq!(bytes, [0x00, 0x01, 0xff, 0xfe]);
        assert_eq!(decode_all::<i16>(Endian::Big, &bytes), [1, -2]);
        assert_eq!(decode_all::<i16>(Endian::Little, &bytes), [256, -257]);
    }

    #[test]
    fn test_float_to_int_truncates_and_saturates() {
        assert_eq!(i16::from_f32(-2.7), -2);
        assert_eq!(i16::from_f32(1.0e6), i16::MAX);
        assert_eq!(u8::from_f32(-3.0), 0);
        assert_eq!(u8::from_f64(255.9), 255);
    }
}
