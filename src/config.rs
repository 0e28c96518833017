use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::module::Module;

/// Name of the persisted config file in the project root.
pub const CONFIG_FILE: &str = "vend.json";

/// Root aggregate of tracked state: modules plus alias mappings.
///
/// Canonical form is enforced after every reducer batch: modules sorted by
/// `path`, each module's `files` sorted, aliases sorted by key (the
/// `BTreeMap` keeps them that way). The persisted JSON is therefore
/// deterministic and diff-friendly across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub modules: Vec<Module>,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Config {
    /// Load and validate the config file. Any violation (missing file,
    /// malformed JSON, missing `modules`, empty module fields) is a
    /// single load failure; nothing is partially accepted.
    pub fn load(path: &Path) -> Result<Self> {
        let load_error = |message: String| Error::ConfigLoad {
            path: path.to_path_buf(),
            message,
        };

        let contents = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let config: Config =
            serde_json::from_str(&contents).map_err(|e| load_error(e.to_string()))?;

        for (index, module) in config.modules.iter().enumerate() {
            if module.protocol.is_empty() || module.path.is_empty() {
                return Err(load_error(format!(
                    "module {} has an empty protocol or path",
                    index
                )));
            }
            for file in &module.files {
                if !file.starts_with('/') {
                    return Err(load_error(format!(
                        "module {} file '{}' must start with '/'",
                        module.path, file
                    )));
                }
            }
        }

        Ok(config)
    }

    /// Persist the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self).map_err(|e| Error::RepositoryIo {
            path: path.to_path_buf(),
            source: io::Error::other(e),
        })?;
        fs::write(path, contents).map_err(|e| Error::RepositoryIo {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Match a fully qualified URL against tracked module identities by
    /// longest prefix. Returns the module index and the remainder of the
    /// URL (the module-relative file path, possibly empty).
    ///
    /// Resolution lives here, once, so no caller re-derives the
    /// module/file split by ad hoc string surgery.
    pub fn resolve<'u>(&self, url: &'u str) -> Option<(usize, &'u str)> {
        let mut best: Option<(usize, usize)> = None;
        for (index, module) in self.modules.iter().enumerate() {
            let prefix = module.url();
            if url.starts_with(&prefix) && best.is_none_or(|(_, len)| prefix.len() > len) {
                best = Some((index, prefix.len()));
            }
        }
        best.map(|(index, len)| (index, &url[len..]))
    }

    /// Find a module by exact identity.
    pub fn find_module(&self, protocol: &str, path: &str) -> Option<usize> {
        self.modules
            .iter()
            .position(|m| m.protocol == protocol && m.path == path)
    }

    /// Whether `url` is already tracked as a link.
    pub fn has_link(&self, url: &str) -> bool {
        match self.resolve(url) {
            Some((index, file)) => self.modules[index].files.iter().any(|f| f == file),
            None => false,
        }
    }

    /// Restore canonical ordering after a mutation batch.
    pub fn canonicalize(&mut self) {
        self.modules.sort_by(|a, b| a.path.cmp(&b.path));
        for module in &mut self.modules {
            module.files.sort();
        }
    }
}
