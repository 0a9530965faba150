pub mod completion;
pub mod config;
pub mod migrate;
pub mod route;
pub mod splices;

use anyhow::{Context, Result};
use std::path::Path;

use crate::model::Diagram;

fn read_diagram(file: &Path) -> Result<Diagram> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    Diagram::load(file).with_context(|| format!("Failed to load {}", file.display()))
}

/// Write `contents` to `output`, or to stdout when no file is given.
fn emit(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}
