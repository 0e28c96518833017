use crate::module::Module;

/// A requested state change.
///
/// Actions are the only way config state is created or destroyed: the
/// store reducer validates and applies a batch in memory, then the
/// repository applier mirrors the same batch as filesystem effects.
///
/// URL-carrying variants hold a fully qualified `protocol://path{file}`
/// string; the tracked module it belongs to is found by longest-prefix
/// match (see [`crate::Config::resolve`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Track a new module pinned at a version.
    AddModule(Module),
    /// Stop tracking a module and all of its files.
    RemoveModule { protocol: String, path: String },
    /// Track a module file and generate its vendor shim.
    AddLink { url: String },
    /// Remove a tracked module file and its vendor shim.
    RemoveLink { url: String },
    /// Map a stable local path to a module-file URL.
    AddAlias { target: String, alias_path: String },
    /// Remove an alias mapping.
    RemoveAlias { alias_path: String },
    /// Re-pin a tracked module; every linked file is rewritten.
    UpdateModuleVersion {
        protocol: String,
        path: String,
        version: String,
    },
}
