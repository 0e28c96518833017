use crate::{ui, Project};
use anyhow::{Context, Result};
use std::path::Path;

pub fn execute(root: &Path, target: &str, path: &str) -> Result<()> {
    let mut project = Project::open(root)?;
    project
        .add_alias(target, path)
        .with_context(|| format!("Failed to create alias {path}"))?;
    ui::success("Aliased", format!("{path} => {target}"));
    Ok(())
}
