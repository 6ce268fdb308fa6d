//! Reference date and pixel reconciliation.

use crate::DiffError;
use log::warn;
use sarstack::Metadata;

/// Corrections to apply to the secondary time series before it is
/// subtracted from the primary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceCorrection {
    /// Epoch the secondary must be re-zeroed against.
    pub date: Option<String>,

    /// Pixel, as (row, column), the secondary must be re-zeroed
    /// against.
    pub pixel: Option<(usize, usize)>,
}

impl ReferenceCorrection {
    pub fn is_none(&self) -> bool {
        self.date.is_none() && self.pixel.is_none()
    }
}

/// Compares the reference date and pixel of two time series.
///
/// On a mismatch the correction always carries the *primary's*
/// reference; the secondary's own reference pixel is only reported.
pub fn check_reference(
    primary: &Metadata,
    secondary: &Metadata,
) -> Result<ReferenceCorrection, DiffError> {
    let (ref_date1, ref_date2) = (primary.ref_date()?, secondary.ref_date()?);
    let date = if ref_date1 == ref_date2 {
        None
    } else {
        warn!("consider different reference date: {ref_date1} vs {ref_date2}");
        Some(ref_date1.to_string())
    };

    let (ref_pixel1, ref_pixel2) = (primary.ref_pixel()?, secondary.ref_pixel()?);
    let pixel = if ref_pixel1 == ref_pixel2 {
        None
    } else {
        warn!("consider different reference pixel: {ref_pixel1:?} vs {ref_pixel2:?}");
        Some(ref_pixel1)
    };

    Ok(ReferenceCorrection { date, pixel })
}

#[cfg(test)]
mod tests {
    use super::{check_reference, ReferenceCorrection};
    use crate::DiffError;
    use sarstack::{Metadata, StackError};

    fn meta(ref_date: &str, ref_y: &str, ref_x: &str) -> Metadata {
        [("REF_DATE", ref_date), ("REF_Y", ref_y), ("REF_X", ref_x)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_same_reference() {
        let correction = check_reference(
            &meta("20180101", "10", "20"),
            &meta("20180101", "10", "20"),
        )
        .unwrap();
        assert!(correction.is_none());
    }

    #[test]
    fn test_reference_pixel_compared_as_integers() {
        let correction =
            check_reference(&meta("20180101", "10", "20"), &meta("20180101", "010", "20"))
                .unwrap();
        assert_eq!(correction, ReferenceCorrection::default());
    }

    #[test]
    fn test_different_reference_date() {
        let correction = check_reference(
            &meta("20180113", "10", "20"),
            &meta("20180101", "10", "20"),
        )
        .unwrap();
        assert_eq!(correction.date.as_deref(), Some("20180113"));
        assert_eq!(correction.pixel, None);
    }

    #[test]
    fn test_different_reference_pixel_uses_primary() {
        let correction =
            check_reference(&meta("20180101", "10", "20"), &meta("20180101", "3", "4")).unwrap();
        assert_eq!(correction.date, None);
        assert_eq!(correction.pixel, Some((10, 20)));
    }

    #[test]
    fn test_missing_reference() {
        let secondary: Metadata = [("REF_Y", "1"), ("REF_X", "1")].into_iter().collect();
        assert!(matches!(
            check_reference(&meta("20180101", "1", "1"), &secondary),
            Err(DiffError::Stack(StackError::MissingKey(key))) if key == "REF_DATE"
        ));
    }
}
