use crate::{ui, Project};
use anyhow::{Context, Result};
use std::path::Path;

pub fn execute(root: &Path, path: &str) -> Result<()> {
    let mut project = Project::open(root)?;
    project
        .remove_alias(path)
        .with_context(|| format!("Failed to remove alias {path}"))?;
    ui::success("Unaliased", path);
    Ok(())
}
