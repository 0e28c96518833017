use crate::{ui, Project};
use anyhow::{Context, Result};
use std::path::Path;

pub fn execute(root: &Path, url: &str) -> Result<()> {
    let mut project = Project::open(root)?;
    let module = project
        .update_module(url)
        .with_context(|| format!("Failed to update module {url}"))?;
    ui::success(
        "Updated",
        format!("{} (version {})", module.url(), module.version),
    );
    Ok(())
}
