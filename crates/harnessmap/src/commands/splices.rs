use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::junction::{detect_splices, junction_id_for_pin, pending_splices};

pub fn run(file: &Path) -> Result<()> {
    let diagram = super::read_diagram(file)?;
    let groups = detect_splices(&diagram);
    if groups.is_empty() {
        println!("{}", "No implicit splices found.".green());
        return Ok(());
    }

    let pending: Vec<&str> = pending_splices(&diagram)
        .iter()
        .map(|g| g.source_pin_id)
        .collect();
    println!("Found {} implicit splice(s):", groups.len());
    for group in &groups {
        let junction = junction_id_for_pin(group.source_pin_id);
        let wires: Vec<&str> = group.wires.iter().map(|w| w.id.as_str()).collect();
        let status = if pending.contains(&group.source_pin_id) {
            "pending".yellow()
        } else {
            "migrated".dimmed()
        };
        println!(
            "  {} -> {} wires ({}) [{}] {status}",
            group.source_pin_id.bold(),
            wires.len(),
            wires.join(", "),
            junction,
        );
    }
    Ok(())
}
