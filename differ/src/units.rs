use sarstack::FileKind;

/// Time-series formats accepted as the secondary of a time-series
/// difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFormat {
    /// Displacement in meters.
    TimeSeries,

    /// GIAnT displacement in millimeters.
    GiantTimeSeries,
}

impl CubeFormat {
    pub fn from_kind(kind: &FileKind) -> Option<Self> {
        match kind {
            FileKind::TimeSeries => Some(Self::TimeSeries),
            FileKind::GiantTimeSeries => Some(Self::GiantTimeSeries),
            FileKind::Other(_) => None,
        }
    }

    /// Factor converting stored values to meters.
    pub const fn unit_scale(self) -> f64 {
        match self {
            Self::TimeSeries => 1.0,
            Self::GiantTimeSeries => 0.001,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CubeFormat;
    use sarstack::FileKind;

    #[test]
    fn test_unit_scale() {
        let ts = CubeFormat::from_kind(&FileKind::TimeSeries).unwrap();
        let giant = CubeFormat::from_kind(&FileKind::GiantTimeSeries).unwrap();
        assert_eq!(ts.unit_scale(), 1.0);
        assert_eq!(giant.unit_scale(), 0.001);
        assert_eq!(CubeFormat::from_kind(&FileKind::from("velocity")), None);
    }
}
