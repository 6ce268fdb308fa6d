//! ROI_PAC style `.rsc` metadata records.

use crate::{DataType, Endian, StackError};
use std::{
    collections::{BTreeMap, HashSet},
    ffi::OsString,
    fmt,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

pub const FILE_TYPE: &str = "FILE_TYPE";
pub const DATA_TYPE: &str = "DATA_TYPE";
pub const BYTE_ORDER: &str = "BYTE_ORDER";
pub const WIDTH: &str = "WIDTH";
pub const LENGTH: &str = "LENGTH";
pub const DATE_LIST: &str = "DATE_LIST";
pub const REF_DATE: &str = "REF_DATE";
pub const REF_Y: &str = "REF_Y";
pub const REF_X: &str = "REF_X";

/// Returns the path of the metadata sidecar for the data file at
/// `path`.
pub fn rsc_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut rsc = OsString::from(path.as_ref().as_os_str());
    rsc.push(".rsc");
    PathBuf::from(rsc)
}

/// Declared kind of a stack file, taken from its `FILE_TYPE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    /// A displacement time-series cube.
    TimeSeries,

    /// A time-series cube produced by GIAnT, stored in millimeters.
    GiantTimeSeries,

    /// Any single 2-D raster (velocity, mask, DEM error, ...).
    Other(String),
}

impl FileKind {
    pub fn is_cube(&self) -> bool {
        matches!(self, Self::TimeSeries | Self::GiantTimeSeries)
    }
}

impl From<&str> for FileKind {
    fn from(s: &str) -> Self {
        match s {
            "timeseries" => Self::TimeSeries,
            "giantTimeseries" => Self::GiantTimeSeries,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeSeries => f.write_str("timeseries"),
            Self::GiantTimeSeries => f.write_str("giantTimeseries"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Key-value attributes describing a stack file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the metadata stored in the sidecar of the data file at
    /// `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StackError> {
        let rsc = rsc_path(&path);
        match fs::read_to_string(&rsc) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StackError::NotFound(rsc)),
            Err(e) => Err(StackError::Io(e)),
        }
    }

    /// Parses `KEY VALUE` lines.
    ///
    /// Blank lines and lines starting with `#` or `%` are skipped.
    pub fn parse(text: &str) -> Self {
        let mut attrs = BTreeMap::new();
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
                continue;
            }
            let (key, value) = match line.find(char::is_whitespace) {
                Some(idx) => (&line[..idx], line[idx..].trim()),
                None => (line, ""),
            };
            attrs.insert(key.to_string(), value.to_string());
        }
        Self(attrs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str, StackError> {
        self.get(key)
            .ok_or_else(|| StackError::MissingKey(key.to_string()))
    }

    pub fn set<K: Into<String>, V: ToString>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.to_string());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses the value stored under `key`.
    pub fn parse_value<T: FromStr>(&self, key: &str) -> Result<T, StackError> {
        let value = self.require(key)?;
        value.parse().map_err(|_| StackError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    pub fn file_kind(&self) -> Result<FileKind, StackError> {
        self.require(FILE_TYPE).map(FileKind::from)
    }

    /// Returns the sample type, `float32` when unspecified.
    pub fn data_type(&self) -> Result<DataType, StackError> {
        self.get(DATA_TYPE)
            .map_or(Ok(DataType::default()), DataType::from_str)
    }

    /// Returns the sample byte order, little-endian when unspecified.
    pub fn byte_order(&self) -> Result<Endian, StackError> {
        self.get(BYTE_ORDER)
            .map_or(Ok(Endian::default()), Endian::from_str)
    }

    /// Returns (rows, columns).
    pub fn dimensions(&self) -> Result<(usize, usize), StackError> {
        Ok((self.parse_value(LENGTH)?, self.parse_value(WIDTH)?))
    }

    /// Returns the acquisition dates of a time-series cube.
    pub fn date_list(&self) -> Result<Vec<String>, StackError> {
        let raw = self.require(DATE_LIST)?;
        let dates: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();
        let mut seen = HashSet::new();
        if dates.is_empty() || !dates.iter().all(|d| seen.insert(d.as_str())) {
            return Err(StackError::InvalidValue {
                key: DATE_LIST.to_string(),
                value: raw.to_string(),
            });
        }
        Ok(dates)
    }

    pub fn set_date_list<S: AsRef<str>>(&mut self, dates: &[S]) {
        let joined = dates.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
        self.set(DATE_LIST, joined);
    }

    pub fn ref_date(&self) -> Result<&str, StackError> {
        self.require(REF_DATE)
    }

    /// Returns the reference pixel as (row, column).
    pub fn ref_pixel(&self) -> Result<(usize, usize), StackError> {
        Ok((self.parse_value(REF_Y)?, self.parse_value(REF_X)?))
    }

    /// Writes `self` in `.rsc` layout.
    pub fn write_to<W: Write>(&self, mut wtr: W) -> std::io::Result<()> {
        let width = self.0.keys().map(String::len).max().unwrap_or(0);
        for (key, value) in &self.0 {
            writeln!(wtr, "{key:<width$}    {value}")?;
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut meta = Self::new();
        for (k, v) in iter {
            meta.set(k, v);
        }
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::{rsc_path, FileKind, Metadata, DATE_LIST};
    use crate::{DataType, Endian, StackError};
    use std::path::Path;

    const RSC: &str = "
        # written by an interferogram processor
        FILE_TYPE     timeseries
        WIDTH         3
        LENGTH        2
        REF_DATE      20180101
        REF_Y         1
        REF_X         2
        DATE_LIST     20180101,20180113,20180125
        PROCESSOR     isce stripmap
        EMPTY
    ";

    #[test]
    fn test_parse() {
        let meta = Metadata::parse(RSC);
        assert_eq!(meta.file_kind().unwrap(), FileKind::TimeSeries);
        assert_eq!(meta.dimensions().unwrap(), (2, 3));
        assert_eq!(meta.ref_date().unwrap(), "20180101");
        assert_eq!(meta.ref_pixel().unwrap(), (1, 2));
        assert_eq!(meta.get("PROCESSOR"), Some("isce stripmap"));
        assert_eq!(meta.get("EMPTY"), Some(""));
        assert_eq!(meta.data_type().unwrap(), DataType::F32);
        assert_eq!(meta.byte_order().unwrap(), Endian::Little);
        assert_eq!(
            meta.date_list().unwrap(),
            ["20180101", "20180113", "20180125"]
        );
    }

    #[test]
    fn test_write_then_parse() {
        let meta = Metadata::parse(RSC);
        let mut buf = Vec::new();
        meta.write_to(&mut buf).unwrap();
        assert_eq!(Metadata::parse(std::str::from_utf8(&buf).unwrap()), meta);
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let meta: Metadata = [(DATE_LIST, "20180101,20180113,20180101")]
            .into_iter()
            .collect();
        assert!(matches!(
            meta.date_list(),
            Err(StackError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_missing_and_invalid_values() {
        let meta: Metadata = [("WIDTH", "ten")].into_iter().collect();
        assert!(matches!(
            meta.dimensions(),
            Err(StackError::MissingKey(key)) if key == "LENGTH"
        ));
        let meta: Metadata = [("WIDTH", "ten"), ("LENGTH", "4")].into_iter().collect();
        assert!(matches!(
            meta.dimensions(),
            Err(StackError::InvalidValue { key, .. }) if key == "WIDTH"
        ));
    }

    #[test]
    fn test_file_kind_display() {
        for name in ["timeseries", "giantTimeseries", "velocity"] {
            assert_eq!(FileKind::from(name).to_string(), name);
        }
        assert!(FileKind::from("giantTimeseries").is_cube());
        assert!(!FileKind::from("velocity").is_cube());
    }

    #[test]
    fn test_rsc_path() {
        assert_eq!(
            rsc_path("data/velocity.h5"),
            Path::new("data/velocity.h5.rsc")
        );
    }
}
