use crate::{
    dtype::encode_all,
    metadata::{self, rsc_path},
    DataType, Endian, Metadata, RasterData, StackError,
};
use log::debug;
use ndarray::Array3;
use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Where the metadata of an output file comes from.
#[derive(Debug, Clone, Copy)]
pub enum MetadataSource<'a> {
    /// Copy the metadata of an existing stack file.
    Reference(&'a Path),

    /// Use this record.
    Explicit(&'a Metadata),
}

impl MetadataSource<'_> {
    fn resolve(self) -> Result<Metadata, StackError> {
        match self {
            Self::Reference(path) => crate::read_metadata(path),
            Self::Explicit(meta) => Ok(meta.clone()),
        }
    }
}

/// Writes a 2-D raster and its metadata to `out`.
pub fn write_raster<P: AsRef<Path>>(
    data: &RasterData,
    out: P,
    source: MetadataSource<'_>,
) -> Result<(), StackError> {
    let mut meta = source.resolve()?;
    let (rows, cols) = data.dim();
    meta.set(metadata::LENGTH, rows);
    meta.set(metadata::WIDTH, cols);
    meta.set(metadata::DATA_TYPE, data.data_type());
    meta.set(metadata::BYTE_ORDER, Endian::Little.name());
    let bytes = data.encode(&meta)?;
    commit(out.as_ref(), &bytes, &meta)
}

/// Writes a time-series cube and its metadata to `out`.
///
/// Samples are stored in the `DATA_TYPE` of the metadata source, so a
/// difference keeps the sample type of the cube it was derived from.
pub fn write_cube<P: AsRef<Path>>(
    data: &Array3<f64>,
    out: P,
    source: MetadataSource<'_>,
) -> Result<(), StackError> {
    let mut meta = source.resolve()?;
    let (num_date, rows, cols) = data.dim();
    let date_list = meta.date_list()?;
    if date_list.len() != num_date {
        return Err(StackError::ShapeMismatch {
            expected: vec![date_list.len(), rows, cols],
            actual: vec![num_date, rows, cols],
        });
    }
    meta.set(metadata::LENGTH, rows);
    meta.set(metadata::WIDTH, cols);
    meta.set(metadata::BYTE_ORDER, Endian::Little.name());
    let bytes = match meta.data_type()? {
        DataType::F64 => {
            let samples: Vec<f64> = data.iter().copied().collect();
            encode_all(Endian::Little, &samples)
        }
        DataType::F32 => {
            #[allow(clippy::cast_possible_truncation)]
            let samples: Vec<f32> = data.iter().map(|&v| v as f32).collect();
            encode_all(Endian::Little, &samples)
        }
        other => {
            return Err(StackError::Format {
                path: out.as_ref().to_owned(),
                reason: format!("time-series samples must be floating point, not {other}"),
            })
        }
    };
    commit(out.as_ref(), &bytes, &meta)
}

/// Writes data and sidecar to temporary files, then moves both into
/// place.
fn commit(out: &Path, bytes: &[u8], meta: &Metadata) -> Result<(), StackError> {
    let rsc = rsc_path(out);
    let (out_tmp, rsc_tmp) = (tmp_path(out), tmp_path(&rsc));
    debug!("writing {out:?}");

    let written = (|| -> Result<(), StackError> {
        let mut wtr = BufWriter::new(File::create(&out_tmp)?);
        wtr.write_all(bytes)?;
        wtr.flush()?;
        let mut wtr = BufWriter::new(File::create(&rsc_tmp)?);
        meta.write_to(&mut wtr)?;
        wtr.flush()?;
        Ok(())
    })();
    if let Err(e) = written {
        let _ = fs::remove_file(&out_tmp);
        let _ = fs::remove_file(&rsc_tmp);
        return Err(e);
    }

    // The data file goes last: without it the sidecar alone is not a
    // readable stack file.
    if let Err(e) = fs::rename(&rsc_tmp, &rsc) {
        let _ = fs::remove_file(&out_tmp);
        let _ = fs::remove_file(&rsc_tmp);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&out_tmp, out) {
        let _ = fs::remove_file(&out_tmp);
        let _ = fs::remove_file(&rsc);
        return Err(e.into());
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
