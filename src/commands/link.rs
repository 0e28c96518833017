use crate::{ui, Project};
use anyhow::{Context, Result};
use std::path::Path;

pub fn execute(root: &Path, url: &str) -> Result<()> {
    let mut project = Project::open(root)?;
    project
        .add_link(url)
        .with_context(|| format!("Failed to create link {url}"))?;
    ui::success("Linked", url);
    Ok(())
}
