use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::config::Config;
use crate::junction::{migrate_with, pending_splices};
use crate::model::Diagram;

pub fn run(file: &Path, output: Option<&Path>, check: bool) -> Result<()> {
    let diagram = super::read_diagram(file)?;

    if check {
        check_up_to_date(&diagram)?;
        eprintln!("{}", "Diagram is up to date.".green());
        return Ok(());
    }

    let options = Config::load_or_default().migration_options();
    let migrated = migrate_with(&diagram, &options);
    let added = migrated.junctions.len() - diagram.junctions.len();
    super::emit(output, &migrated.to_json()?)?;

    if let Some(path) = output {
        let summary = if added == 0 {
            "nothing to migrate".to_string()
        } else {
            format!("{added} junction(s) added")
        };
        eprintln!(
            "{} {} ({summary})",
            "Wrote".green().bold(),
            path.display()
        );
    }
    Ok(())
}

/// Fails when `migrate` would still add a junction.
fn check_up_to_date(diagram: &Diagram) -> Result<()> {
    let pending = pending_splices(diagram).len();
    if pending > 0 {
        anyhow::bail!("{pending} implicit splice(s) need migration");
    }
    Ok(())
}
