use crate::{ui, Project};
use anyhow::{Context, Result};
use std::path::Path;

pub fn execute(root: &Path) -> Result<()> {
    let config_path = Project::init(root).context("Failed to initialize project config")?;
    ui::success("Initialized", config_path.display());
    Ok(())
}
