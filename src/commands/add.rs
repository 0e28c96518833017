use crate::{ui, Project};
use anyhow::{Context, Result};
use std::path::Path;

pub fn execute(root: &Path, url: &str) -> Result<()> {
    let mut project = Project::open(root)?;
    let module = project
        .add_module(url)
        .with_context(|| format!("Failed to add module {url}"))?;
    ui::success(
        "Added",
        format!("{} (version {})", module.url(), module.version),
    );
    Ok(())
}
