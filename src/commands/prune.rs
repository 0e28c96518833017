use crate::{scan, ui, Project};
use anyhow::{Context, Result};
use std::path::Path;

pub fn execute(root: &Path, excludes: Vec<String>) -> Result<()> {
    let mut project = Project::open(root)?;
    let excludes = scan::with_default_excludes(excludes);

    let progress = ui::Progress::new("Pruning", "scanning project imports");
    let (links, modules) = project
        .prune(&excludes)
        .context("Failed to prune unused links")?;
    progress.success(
        "Pruned",
        Some(format!("({links} link(s), {modules} module(s) removed)")),
    );
    Ok(())
}
