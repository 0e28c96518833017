use crate::{scan, ui, Project};
use anyhow::{Context, Result};
use std::path::Path;

pub fn execute(root: &Path, excludes: Vec<String>) -> Result<()> {
    let mut project = Project::open(root)?;
    let excludes = scan::with_default_excludes(excludes);

    let progress = ui::Progress::new("Ensuring", "scanning project imports");
    let created = project
        .ensure(&excludes)
        .context("Failed to resolve project imports")?;
    progress.success("Ensured", Some(format!("({created} link(s) created)")));
    Ok(())
}
