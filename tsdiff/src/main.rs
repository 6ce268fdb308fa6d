mod diff;
mod options;

use anyhow::Result;
use clap::Parser;
use log::debug;
use options::Cli;
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let t0 = std::time::Instant::now();
    let out = cli.run()?;
    debug!("time used: {:?}", t0.elapsed());
    println!("{}", out.display());
    Ok(())
}
