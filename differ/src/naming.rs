use crate::DiffError;
use std::path::{Path, PathBuf};

/// Returns `<primary>_diff_<secondary><primary extension>`, next to
/// the primary.
///
/// There is no sensible default when more than one file is
/// subtracted.
pub fn default_output<P: AsRef<Path>>(
    primary: P,
    secondaries: &[PathBuf],
) -> Result<PathBuf, DiffError> {
    let secondary = match secondaries {
        [] => return Err(DiffError::NoSecondary),
        [secondary] => secondary,
        _ => return Err(DiffError::MissingOutputName),
    };
    let primary = primary.as_ref();
    let mut name = primary.file_stem().unwrap_or_default().to_os_string();
    name.push("_diff_");
    name.push(secondary.file_stem().unwrap_or_default());
    if let Some(ext) = primary.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(primary.with_file_name(name))
}

#[cfg(test)]
mod tests {
    use super::default_output;
    use crate::DiffError;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_default_output() {
        let out = default_output("velocity.h5", &[PathBuf::from("demErr.h5")]).unwrap();
        assert_eq!(out, Path::new("velocity_diff_demErr.h5"));
    }

    #[test]
    fn test_default_output_keeps_primary_dir() {
        let out = default_output(
            "mintpy/timeseries.h5",
            &[PathBuf::from("../GIANT/Stack/LS-PARAMS.h5")],
        )
        .unwrap();
        assert_eq!(out, Path::new("mintpy/timeseries_diff_LS-PARAMS.h5"));
    }

    #[test]
    fn test_default_output_without_extension() {
        let out = default_output("velocity", &[PathBuf::from("dir/demErr.h5")]).unwrap();
        assert_eq!(out, Path::new("velocity_diff_demErr"));
    }

    #[test]
    fn test_ambiguous_output() {
        let secondaries = [PathBuf::from("maskSantiago.h5"), PathBuf::from("maskFernandina.h5")];
        assert!(matches!(
            default_output("waterMask.h5", &secondaries),
            Err(DiffError::MissingOutputName)
        ));
        assert!(matches!(
            default_output("waterMask.h5", &[]),
            Err(DiffError::NoSecondary)
        ));
    }
}
