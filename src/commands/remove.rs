use crate::{ui, Project};
use anyhow::{Context, Result};
use std::path::Path;

pub fn execute(root: &Path, url: &str) -> Result<()> {
    let mut project = Project::open(root)?;
    let module = project
        .remove_module(url)
        .with_context(|| format!("Failed to remove module {url}"))?;
    ui::success("Removed", module.url());
    Ok(())
}
