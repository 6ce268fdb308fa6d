//! Epoch alignment between two time series.

use crate::DiffError;
use log::warn;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochAlignment {
    /// Primary dates also present in the secondary, in primary order.
    pub shared: Vec<String>,

    /// One entry per primary date, `true` where that date is shared.
    pub included: Vec<bool>,

    /// Primary dates missing from the secondary, in primary order.
    pub excluded: Vec<String>,
}

impl EpochAlignment {
    pub fn is_complete(&self) -> bool {
        self.excluded.is_empty()
    }
}

/// Aligns the epochs of a secondary time series onto the primary's.
///
/// Dates only the secondary has are ignored. Dates only the primary has
/// are an error unless `force` is set, in which case they are excluded
/// from differencing.
pub fn align_epochs<S: AsRef<str>>(
    primary: &[S],
    secondary: &[S],
    force: bool,
) -> Result<EpochAlignment, DiffError> {
    let secondary: HashSet<&str> = secondary.iter().map(AsRef::as_ref).collect();
    let included: Vec<bool> = primary
        .iter()
        .map(|date| secondary.contains(date.as_ref()))
        .collect();
    let (mut shared, mut excluded) = (Vec::new(), Vec::new());
    for (date, &inc) in primary.iter().zip(&included) {
        let date = date.as_ref().to_string();
        if inc {
            shared.push(date);
        } else {
            excluded.push(date);
        }
    }

    if !excluded.is_empty() {
        if !force {
            return Err(DiffError::UnalignedEpochs { missing: excluded });
        }
        warn!("continue and enforce the differencing for their shared dates only");
        warn!("the following dates are ignored for differencing: {excluded:?}");
    }

    Ok(EpochAlignment {
        shared,
        included,
        excluded,
    })
}

#[cfg(test)]
mod tests {
    use super::align_epochs;
    use crate::DiffError;

    const PRIMARY: [&str; 4] = ["20180101", "20180113", "20180125", "20180206"];

    #[test]
    fn test_full_overlap() {
        let alignment = align_epochs(&PRIMARY, &PRIMARY, false).unwrap();
        assert!(alignment.is_complete());
        assert_eq!(alignment.shared, PRIMARY);
        assert_eq!(alignment.included, [true; 4]);
    }

    #[test]
    fn test_secondary_extras_ignored() {
        let secondary = ["20171220", "20180101", "20180113", "20180125", "20180206", "20180218"];
        let alignment = align_epochs(&PRIMARY, &secondary, false).unwrap();
        assert!(alignment.is_complete());
        assert_eq!(alignment.shared, PRIMARY);
    }

    #[test]
    fn test_missing_dates_without_force() {
        let secondary = ["20180101", "20180125"];
        let err = align_epochs(&PRIMARY, &secondary, false).unwrap_err();
        assert!(matches!(
            &err,
            DiffError::UnalignedEpochs { missing } if missing == &["20180113", "20180206"]
        ));
        assert!(err.to_string().contains("force"));
    }

    #[test]
    fn test_missing_dates_with_force() {
        let secondary = ["20180206", "20180101", "20180125"];
        let alignment = align_epochs(&PRIMARY, &secondary, true).unwrap();
        assert_eq!(alignment.shared, ["20180101", "20180125", "20180206"]);
        assert_eq!(alignment.included, [true, false, true, true]);
        assert_eq!(alignment.excluded, ["20180113"]);
    }

    #[test]
    fn test_no_overlap_with_force() {
        let alignment = align_epochs(&PRIMARY, &["20190101"], true).unwrap();
        assert!(alignment.shared.is_empty());
        assert_eq!(alignment.included, [false; 4]);
        assert_eq!(alignment.excluded, PRIMARY);
    }
}
