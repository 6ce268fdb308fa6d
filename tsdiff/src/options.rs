use clap::Parser;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  tsdiff  velocity.h5    velocity_demErr.h5
  tsdiff  timeseries.h5  ERA5.h5  -o timeseries_ERA5.h5
  tsdiff  timeseries.h5  ERA5.h5  -o timeseries_ERA5.h5  --force
  tsdiff  timeseries_ERA5_ramp_demErr.h5  ../GIANT/Stack/LS-PARAMS.h5  -o mintpy_giant.h5

  # multiple files
  tsdiff  waterMask.h5  maskSantiago.h5  maskFernandina.h5  -o maskIsabela.h5";

/// Generates the difference of two or more input files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// File to be subtracted from.
    pub file1: PathBuf,

    /// Files to subtract, in order.
    #[arg(required = true)]
    pub file2: Vec<PathBuf>,

    /// Output file name, default is <FILE1>_diff_<FILE2>.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Difference time-series files on their shared dates only.
    #[arg(long)]
    pub force: bool,

    /// Memory map input files instead of reading them into memory.
    #[arg(long)]
    pub memmap: bool,
}
