use crate::options::Cli;
use anyhow::Result;
use differ::Diff;
use sarstack::StoreMode;
use std::path::PathBuf;

impl Cli {
    pub fn run(&self) -> Result<PathBuf> {
        let store_mode = if self.memmap {
            StoreMode::MemMap
        } else {
            StoreMode::InMem
        };
        let out = Diff::builder()
            .primary(&self.file1)
            .secondaries(&self.file2)
            .output(self.output.as_ref())
            .force(self.force)
            .store_mode(store_mode)
            .build()?
            .run()?;
        Ok(out)
    }
}
