use crate::actions::Action;
use crate::config::Config;
use crate::error::{Error, Result};

/// Apply an action batch to a config snapshot.
///
/// Pure: the input config is never mutated and no I/O happens here. The
/// batch is processed left to right and is all-or-nothing: the first
/// failing action rejects the whole batch and the caller keeps its
/// original snapshot. On success the new snapshot is re-sorted into
/// canonical form before it is returned.
pub fn apply(config: &Config, actions: &[Action]) -> Result<Config> {
    let mut next = config.clone();
    for action in actions {
        apply_one(&mut next, action)?;
    }
    next.canonicalize();
    Ok(next)
}

fn apply_one(config: &mut Config, action: &Action) -> Result<()> {
    match action {
        Action::AddModule(module) => {
            if config.modules.iter().any(|m| m.same_identity(module)) {
                return Err(Error::ModuleAlreadyExists { url: module.url() });
            }
            config.modules.push(module.clone());
        }

        Action::RemoveModule { protocol, path } => {
            let url = format!("{protocol}://{path}");
            let (index, _) = config
                .resolve(&url)
                .ok_or_else(|| Error::ModuleNotFound { url: url.clone() })?;
            config.modules.remove(index);
        }

        Action::AddLink { url } => {
            let (index, file) = config
                .resolve(url)
                .ok_or_else(|| Error::ModuleNotFound { url: url.clone() })?;
            // A link names a file inside the module, never the module root;
            // anything else would persist a config that fails validation.
            if !file.starts_with('/') {
                return Err(Error::InvalidModuleUrl {
                    url: url.clone(),
                    reason: "missing module file path".to_string(),
                });
            }
            let file = file.to_string();
            let module = &mut config.modules[index];
            if module.files.contains(&file) {
                return Err(Error::LinkAlreadyExists { url: url.clone() });
            }
            module.files.push(file);
        }

        Action::RemoveLink { url } => {
            let (index, file) = config
                .resolve(url)
                .ok_or_else(|| Error::ModuleNotFound { url: url.clone() })?;
            let module = &mut config.modules[index];
            let position = module
                .files
                .iter()
                .position(|f| f == file)
                .ok_or_else(|| Error::LinkNotFound { url: url.clone() })?;
            module.files.remove(position);
        }

        Action::AddAlias { target, alias_path } => {
            if config.aliases.contains_key(alias_path) {
                return Err(Error::AliasAlreadyExists {
                    path: alias_path.clone(),
                });
            }
            // The target must belong to a tracked module, but it does not
            // have to be linked yet; aliasing may be the first reference.
            if config.resolve(target).is_none() {
                return Err(Error::ModuleNotFound {
                    url: target.clone(),
                });
            }
            config.aliases.insert(alias_path.clone(), target.clone());
        }

        Action::RemoveAlias { alias_path } => {
            if config.aliases.remove(alias_path).is_none() {
                return Err(Error::AliasNotFound {
                    path: alias_path.clone(),
                });
            }
        }

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
            config.modules[index].version = version.clone();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Module;
    use std::collections::BTreeMap;

    fn module(path: &str, version: &str, files: &[&str]) -> Module {
        Module {
            protocol: "https".to_string(),
            path: path.to_string(),
            version: version.to_string(),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn config_with(modules: Vec<Module>) -> Config {
        Config {
            modules,
            aliases: BTreeMap::new(),
        }
    }

    fn assert_canonical(config: &Config) {
        let paths: Vec<_> = config.modules.iter().map(|m| m.path.clone()).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted, "modules must be sorted by path");

        for module in &config.modules {
            let mut files = module.files.clone();
            files.sort();
            assert_eq!(module.files, files, "files must be sorted");
            files.dedup();
            assert_eq!(module.files.len(), files.len(), "files must be unique");
        }
    }

    #[test]
    fn test_add_module() {
        let config = config_with(vec![]);
        let next = apply(
            &config,
            &[Action::AddModule(module("example.com/a", "1.0.0", &[]))],
        )
        .unwrap();

        assert_eq!(next.modules.len(), 1);
        assert_eq!(next.modules[0].path, "example.com/a");
        assert!(config.modules.is_empty(), "input snapshot is untouched");
    }

    #[test]
    fn test_add_module_duplicate_rejects_whole_batch() {
        let config = config_with(vec![]);
        let duplicate = module("example.com/a", "1.0.0", &[]);

        let err = apply(
            &config,
            &[
                Action::AddModule(duplicate.clone()),
                Action::AddModule(duplicate),
            ],
        )
        .unwrap_err();

        assert!(matches!(err, Error::ModuleAlreadyExists { .. }));
        // All-or-nothing: the first AddModule must not leak out either.
        assert!(config.modules.is_empty());
    }

    #[test]
    fn test_add_module_same_identity_different_version() {
        let config = config_with(vec![module("example.com/a", "1.0.0", &[])]);
        let err = apply(
            &config,
            &[Action::AddModule(module("example.com/a", "2.0.0", &[]))],
        )
        .unwrap_err();
        assert!(matches!(err, Error::ModuleAlreadyExists { .. }));
    }

    #[test]
    fn test_remove_module() {
        let config = config_with(vec![
            module("example.com/a", "1.0.0", &["/mod.ts"]),
            module("example.com/b", "1.0.0", &[]),
        ]);

        let next = apply(
            &config,
            &[Action::RemoveModule {
                protocol: "https".to_string(),
                path: "example.com/a".to_string(),
            }],
        )
        .unwrap();

        assert_eq!(next.modules.len(), 1);
        assert_eq!(next.modules[0].path, "example.com/b");
    }

    #[test]
    fn test_remove_module_not_found() {
        let config = config_with(vec![]);
        let err = apply(
            &config,
            &[Action::RemoveModule {
                protocol: "https".to_string(),
                path: "example.com/a".to_string(),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, Error::ModuleNotFound { .. }));
    }

    #[test]
    fn test_add_link() {
        let config = config_with(vec![module("example.com/a", "1.0.0", &[])]);
        let next = apply(
            &config,
            &[Action::AddLink {
                url: "https://example.com/a/mod.ts".to_string(),
            }],
        )
        .unwrap();

        assert_eq!(next.modules[0].files, vec!["/mod.ts"]);
    }

    #[test]
    fn test_add_link_already_linked() {
        let config = config_with(vec![module("example.com/a", "1.0.0", &["/mod.ts"])]);
        let err = apply(
            &config,
            &[Action::AddLink {
                url: "https://example.com/a/mod.ts".to_string(),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, Error::LinkAlreadyExists { .. }));
    }

    #[test]
    fn test_add_link_unknown_module() {
        let config = config_with(vec![]);
        let err = apply(
            &config,
            &[Action::AddLink {
                url: "https://example.com/a/mod.ts".to_string(),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, Error::ModuleNotFound { .. }));
    }

    #[test]
    fn test_add_link_rejects_module_root() {
        let config = config_with(vec![module("example.com/a", "1.0.0", &[])]);
        let err = apply(
            &config,
            &[Action::AddLink {
                url: "https://example.com/a".to_string(),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidModuleUrl { .. }));
    }

    #[test]
    fn test_add_link_longest_prefix_wins() {
        let config = config_with(vec![
            module("example.com/a", "1.0.0", &[]),
            module("example.com/a/sub", "2.0.0", &[]),
        ]);

        let next = apply(
            &config,
            &[Action::AddLink {
                url: "https://example.com/a/sub/mod.ts".to_string(),
            }],
        )
        .unwrap();

        let sub = &next.modules[next.find_module("https", "example.com/a/sub").unwrap()];
        assert_eq!(sub.files, vec!["/mod.ts"]);
        let parent = &next.modules[next.find_module("https", "example.com/a").unwrap()];
        assert!(parent.files.is_empty());
    }

    #[test]
    fn test_remove_link() {
        let config = config_with(vec![module("example.com/a", "1.0.0", &["/mod.ts"])]);
        let next = apply(
            &config,
            &[Action::RemoveLink {
                url: "https://example.com/a/mod.ts".to_string(),
            }],
        )
        .unwrap();
        assert!(next.modules[0].files.is_empty());
    }

    #[test]
    fn test_remove_link_not_linked() {
        let config = config_with(vec![module("example.com/a", "1.0.0", &[])]);
        let err = apply(
            &config,
            &[Action::RemoveLink {
                url: "https://example.com/a/mod.ts".to_string(),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, Error::LinkNotFound { .. }));
    }

    #[test]
    fn test_add_alias() {
        let config = config_with(vec![module("example.com/a", "1.0.0", &[])]);
        let next = apply(
            &config,
            &[Action::AddAlias {
                target: "https://example.com/a/mod.ts".to_string(),
                alias_path: "a.ts".to_string(),
            }],
        )
        .unwrap();

        assert_eq!(
            next.aliases.get("a.ts").unwrap(),
            "https://example.com/a/mod.ts"
        );
        // Aliasing does not require (or create) a link.
        assert!(next.modules[0].files.is_empty());
    }

    #[test]
    fn test_add_alias_no_implicit_overwrite() {
        let mut config = config_with(vec![module("example.com/a", "1.0.0", &[])]);
        config.aliases.insert(
            "a.ts".to_string(),
            "https://example.com/a/mod.ts".to_string(),
        );

        let err = apply(
            &config,
            &[Action::AddAlias {
                target: "https://example.com/a/other.ts".to_string(),
                alias_path: "a.ts".to_string(),
            }],
        )
        .unwrap_err();

        assert!(matches!(err, Error::AliasAlreadyExists { .. }));
        assert_eq!(
            config.aliases.get("a.ts").unwrap(),
            "https://example.com/a/mod.ts"
        );
    }

    #[test]
    fn test_add_alias_unmatched_target() {
        let config = config_with(vec![module("example.com/a", "1.0.0", &[])]);
        let err = apply(
            &config,
            &[Action::AddAlias {
                target: "https://unknown.test/lib/mod.ts".to_string(),
                alias_path: "lib.ts".to_string(),
            }],
        )
        .unwrap_err();

        assert!(matches!(err, Error::ModuleNotFound { .. }));
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_remove_alias() {
        let mut config = config_with(vec![module("example.com/a", "1.0.0", &[])]);
        config.aliases.insert(
            "a.ts".to_string(),
            "https://example.com/a/mod.ts".to_string(),
        );

        let next = apply(
            &config,
            &[Action::RemoveAlias {
                alias_path: "a.ts".to_string(),
            }],
        )
        .unwrap();
        assert!(next.aliases.is_empty());
    }

    #[test]
    fn test_remove_alias_not_found() {
        let config = config_with(vec![]);
        let err = apply(
            &config,
            &[Action::RemoveAlias {
                alias_path: "a.ts".to_string(),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, Error::AliasNotFound { .. }));
    }

    #[test]
    fn test_update_module_version() {
        let config = config_with(vec![module("example.com/a", "1.0.0", &["/mod.ts"])]);
        let next = apply(
            &config,
            &[Action::UpdateModuleVersion {
                protocol: "https".to_string(),
                path: "example.com/a".to_string(),
                version: "2.0.0".to_string(),
            }],
        )
        .unwrap();

        assert_eq!(next.modules[0].version, "2.0.0");
        assert_eq!(next.modules[0].files, vec!["/mod.ts"], "files unchanged");
    }

    #[test]
    fn test_update_module_version_requires_exact_identity() {
        let config = config_with(vec![module("example.com/a", "1.0.0", &[])]);
        let err = apply(
            &config,
            &[Action::UpdateModuleVersion {
                protocol: "https".to_string(),
                path: "example.com/a/mod.ts".to_string(),
                version: "2.0.0".to_string(),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, Error::ModuleNotFound { .. }));
    }

    #[test]
    fn test_batch_later_actions_see_earlier_state() {
        let config = config_with(vec![]);
        let next = apply(
            &config,
            &[
                Action::AddModule(module("example.com/a", "1.0.0", &[])),
                Action::AddLink {
                    url: "https://example.com/a/mod.ts".to_string(),
                },
                Action::AddAlias {
                    target: "https://example.com/a/mod.ts".to_string(),
                    alias_path: "a.ts".to_string(),
                },
            ],
        )
        .unwrap();

        assert_eq!(next.modules[0].files, vec!["/mod.ts"]);
        assert_eq!(next.aliases.len(), 1);
    }

    #[test]
    fn test_canonical_ordering_after_apply() {
        let config = config_with(vec![]);
        let next = apply(
            &config,
            &[
                Action::AddModule(module("z.test/lib", "1", &[])),
                Action::AddModule(module("a.test/lib", "1", &[])),
                Action::AddLink {
                    url: "https://z.test/lib/b.ts".to_string(),
                },
                Action::AddLink {
                    url: "https://z.test/lib/a.ts".to_string(),
                },
            ],
        )
        .unwrap();

        assert_canonical(&next);
        assert_eq!(next.modules[0].path, "a.test/lib");
        assert_eq!(next.modules[1].files, vec!["/a.ts", "/b.ts"]);
    }

    #[test]
    fn test_uniqueness_invariants_hold() {
        // Walk a config through a representative batch and assert the
        // reducer never produced duplicate identities, files, or aliases.
        let config = config_with(vec![]);
        let next = apply(
            &config,
            &[
                Action::AddModule(module("example.com/a", "1.0.0", &[])),
                Action::AddModule(module("example.com/b", "1.0.0", &[])),
                Action::AddLink {
                    url: "https://example.com/a/mod.ts".to_string(),
                },
                Action::AddLink {
                    url: "https://example.com/a/util.ts".to_string(),
                },
                Action::RemoveLink {
                    url: "https://example.com/a/util.ts".to_string(),
                },
                Action::AddLink {
                    url: "https://example.com/a/util.ts".to_string(),
                },
            ],
        )
        .unwrap();

        assert_canonical(&next);
        let mut identities: Vec<_> = next
            .modules
            .iter()
            .map(|m| (m.protocol.clone(), m.path.clone()))
            .collect();
        identities.sort();
        identities.dedup();
        assert_eq!(identities.len(), next.modules.len());
    }
}
