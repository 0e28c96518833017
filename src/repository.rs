use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::actions::Action;
use crate::config::Config;
use crate::error::{Error, Result};

/// Directory under the project root that holds generated link shims.
pub const VENDOR_DIR: &str = "vendor";

/// Filesystem effects mirroring the reducer's action set.
///
/// Creation operations create any missing parent directories and then
/// write shim content, overwriting freely (content is regenerated, never
/// merged). Removal operations are idempotent: an already-absent target is
/// reported as success (and logged), any other failure is fatal.
pub trait Repository {
    fn add_link(&self, protocol: &str, path: &str, version: &str, file: &str) -> Result<()>;
    fn remove_link(&self, protocol: &str, path: &str, file: &str) -> Result<()>;
    fn update_link(&self, protocol: &str, path: &str, version: &str, file: &str) -> Result<()>;
    fn add_alias(&self, protocol: &str, path: &str, file: &str, alias_path: &str) -> Result<()>;
    fn remove_alias(&self, alias_path: &str) -> Result<()>;
    fn remove_module(&self, protocol: &str, path: &str) -> Result<()>;
}

/// Shim content for a link: a re-export pinned to the module version.
pub fn link_source(protocol: &str, path: &str, version: &str, file: &str) -> String {
    format!("export * from \"{protocol}://{path}@{version}{file}\";\n")
}

/// Shim content for an alias: a re-export of the module's vendor copy,
/// relative to the alias file's own directory.
pub fn alias_source(protocol: &str, path: &str, file: &str, alias_path: &str) -> String {
    let depth = Path::new(alias_path).components().count().saturating_sub(1);
    let prefix = if depth == 0 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    };
    format!("export * from \"{prefix}{VENDOR_DIR}/{protocol}/{path}{file}\";\n")
}

/// Repository implementation rooted at a project directory: link shims
/// live under `vendor/{protocol}/{path}{file}`, alias shims at their
/// alias path relative to the root.
#[derive(Debug, Clone)]
pub struct VendorDir {
    root: PathBuf,
}

impl VendorDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn link_path(&self, protocol: &str, path: &str, file: &str) -> PathBuf {
        // `file` starts with '/', so append it to the module path rather
        // than joining (join would discard everything before it).
        self.root
            .join(VENDOR_DIR)
            .join(protocol)
            .join(format!("{path}{file}"))
    }

    fn write_shim(&self, target: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::RepositoryIo {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        debug!(path = %target.display(), "writing shim");
        fs::write(target, contents).map_err(|e| Error::RepositoryIo {
            path: target.to_path_buf(),
            source: e,
        })
    }

    fn remove_entry(&self, target: &Path, recursive: bool) -> Result<()> {
        let result = if recursive {
            fs::remove_dir_all(target)
        } else {
            fs::remove_file(target)
        };
        match result {
            Ok(()) => Ok(()),
            // Removal is idempotent; an absent target leaves the tree in
            // the state removal was meant to produce.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %target.display(), "removal target already absent");
                Ok(())
            }
            Err(e) => Err(Error::RepositoryIo {
                path: target.to_path_buf(),
                source: e,
            }),
        }
    }
}

impl Repository for VendorDir {
    fn add_link(&self, protocol: &str, path: &str, version: &str, file: &str) -> Result<()> {
        let target = self.link_path(protocol, path, file);
        self.write_shim(&target, &link_source(protocol, path, version, file))
    }

    fn remove_link(&self, protocol: &str, path: &str, file: &str) -> Result<()> {
        self.remove_entry(&self.link_path(protocol, path, file), false)
    }

    fn update_link(&self, protocol: &str, path: &str, version: &str, file: &str) -> Result<()> {
        let target = self.link_path(protocol, path, file);
        self.write_shim(&target, &link_source(protocol, path, version, file))
    }

    fn add_alias(&self, protocol: &str, path: &str, file: &str, alias_path: &str) -> Result<()> {
        let target = self.root.join(alias_path);
        self.write_shim(&target, &alias_source(protocol, path, file, alias_path))
    }

    fn remove_alias(&self, alias_path: &str) -> Result<()> {
        self.remove_entry(&self.root.join(alias_path), false)
    }

    fn remove_module(&self, protocol: &str, path: &str) -> Result<()> {
        let target = self.root.join(VENDOR_DIR).join(protocol).join(path);
        self.remove_entry(&target, true)
    }
}

/// Mirror a validated action batch onto the filesystem.
///
/// Runs once per action, in the order the reducer validated them, and
/// resolves lookups against the **post**-mutation config: module metadata
/// (notably the version) already reflects the batch, and link entries are
/// still addressable for the removal operations that need them.
pub fn apply_effects(repo: &dyn Repository, config: &Config, actions: &[Action]) -> Result<()> {
    for action in actions {
        match action {
            // Tracking a module writes nothing until a file is linked.
            Action::AddModule(_) => {}

            Action::RemoveModule { protocol, path } => {
                repo.remove_module(protocol, path)?;
            }

            Action::AddLink { url } => {
                let (index, file) = config
                    .resolve(url)
                    .ok_or_else(|| Error::ModuleNotFound { url: url.clone() })?;
                let module = &config.modules[index];
                repo.add_link(&module.protocol, &module.path, &module.version, file)?;
            }

            Action::RemoveLink { url } => {
                let (index, file) = config
                    .resolve(url)
                    .ok_or_else(|| Error::ModuleNotFound { url: url.clone() })?;
                let module = &config.modules[index];
                repo.remove_link(&module.protocol, &module.path, file)?;
            }

            Action::AddAlias { target, alias_path } => {
                let (index, file) = config
                    .resolve(target)
                    .ok_or_else(|| Error::ModuleNotFound {
                        url: target.clone(),
                    })?;
                let module = &config.modules[index];
                repo.add_alias(&module.protocol, &module.path, file, alias_path)?;
            }

            Action::RemoveAlias { alias_path } => {
                repo.remove_alias(alias_path)?;
            }

            // The fan-out point: one version bump rewrites every shim
            // tracked under the module.
            Action::UpdateModuleVersion {
                protocol,
                path,
                version,
            } => {
                let index = config.find_module(protocol, path).ok_or_else(|| {
                    Error::ModuleNotFound {
                        url: format!("{protocol}://{path}"),
                    }
                })?;
                for file in &config.modules[index].files {
                    repo.update_link(protocol, path, version, file)?;
                }
            }
        }
    }
    Ok(())
}
