use std::path::{Path, PathBuf};
use tracing::debug;

use crate::actions::Action;
use crate::config::{Config, CONFIG_FILE};
use crate::error::Result;
use crate::module::Module;
use crate::reconcile;
use crate::repository::{self, VendorDir};
use crate::scan;
use crate::store;

/// A project directory under vend management.
///
/// Owns the working copy of the config plus the vendor repository, and
/// sequences every state change through [`Project::commit`]: reducer
/// first (validate and compute the new snapshot in memory), then
/// filesystem effects, then persistence.
pub struct Project {
    root: PathBuf,
    config_path: PathBuf,
    config: Config,
    repo: VendorDir,
}

impl Project {
    /// Create a fresh project by writing an empty config file.
    pub fn init(root: &Path) -> Result<PathBuf> {
        let config_path = root.join(CONFIG_FILE);
        Config::default().save(&config_path)?;
        Ok(config_path)
    }

    /// Load an existing project rooted at `root`.
    pub fn open(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);
        let config = Config::load(&config_path)?;
        Ok(Self {
            root: root.to_path_buf(),
            config_path,
            config,
            repo: VendorDir::new(root),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Apply one action batch as a transaction: reduce, mirror onto the
    /// filesystem, persist.
    ///
    /// If an effect fails partway through, the new snapshot is not
    /// persisted and the on-disk config keeps its pre-batch state; the
    /// vendor tree may be ahead of it until the command is re-run.
    /// Effects are idempotent, so replaying the same batch converges.
    pub fn commit(&mut self, actions: &[Action]) -> Result<()> {
        debug!(count = actions.len(), "committing action batch");
        let next = store::apply(&self.config, actions)?;
        repository::apply_effects(&self.repo, &next, actions)?;
        next.save(&self.config_path)?;
        self.config = next;
        Ok(())
    }

    /// Track a new module pinned at the version carried in `url`.
    pub fn add_module(&mut self, url: &str) -> Result<Module> {
        let module = Module::parse(url)?;
        self.commit(&[Action::AddModule(module.clone())])?;
        Ok(module)
    }

    /// Stop tracking the module named by `url` and delete its vendor tree.
    pub fn remove_module(&mut self, url: &str) -> Result<Module> {
        let module = Module::parse(url)?;
        self.commit(&[Action::RemoveModule {
            protocol: module.protocol.clone(),
            path: module.path.clone(),
        }])?;
        Ok(module)
    }

    /// Re-pin a tracked module to the version carried in `url` and
    /// regenerate every linked shim.
    pub fn update_module(&mut self, url: &str) -> Result<Module> {
        let module = Module::parse(url)?;
        self.commit(&[Action::UpdateModuleVersion {
            protocol: module.protocol.clone(),
            path: module.path.clone(),
            version: module.version.clone(),
        }])?;
        Ok(module)
    }

    /// Track a module file and write its vendor shim.
    pub fn add_link(&mut self, url: &str) -> Result<()> {
        self.commit(&[Action::AddLink {
            url: url.to_string(),
        }])
    }

    /// Remove a tracked module file and its vendor shim.
    pub fn remove_link(&mut self, url: &str) -> Result<()> {
        self.commit(&[Action::RemoveLink {
            url: url.to_string(),
        }])
    }

    /// Map a stable local path to a module-file URL and write the alias
    /// shim.
    pub fn add_alias(&mut self, target: &str, alias_path: &str) -> Result<()> {
        self.commit(&[Action::AddAlias {
            target: target.to_string(),
            alias_path: alias_path.to_string(),
        }])
    }

    /// Remove an alias mapping and its shim file.
    pub fn remove_alias(&mut self, alias_path: &str) -> Result<()> {
        self.commit(&[Action::RemoveAlias {
            alias_path: alias_path.to_string(),
        }])
    }

    /// Scan project imports and create every link not yet tracked.
    /// Returns the number of links created.
    pub fn ensure(&mut self, excludes: &[String]) -> Result<usize> {
        let imports = scan::scan(&self.root, excludes)?;
        let actions = reconcile::ensure_actions(&self.config, &imports);
        let created = actions.len();
        self.commit(&actions)?;
        Ok(created)
    }

    /// Remove links no longer imported, then modules left empty. Two
    /// sequential commits: emptiness is recomputed after the link pass
    /// has been applied. Returns `(links_removed, modules_removed)`.
    pub fn prune(&mut self, excludes: &[String]) -> Result<(usize, usize)> {
        let imports = scan::scan(&self.root, excludes)?;

        let link_actions = reconcile::prune_link_actions(&self.config, &imports);
        let links_removed = link_actions.len();
        self.commit(&link_actions)?;

        let module_actions = reconcile::prune_module_actions(&self.config);
        let modules_removed = module_actions.len();
        self.commit(&module_actions)?;

        Ok((links_removed, modules_removed))
    }
}
