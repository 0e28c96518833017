use std::collections::BTreeSet;

use crate::actions::Action;
use crate::config::Config;

/// Compute the `AddLink` batch that converges tracked links toward the
/// set of imports actually observed in project source.
///
/// Observed URLs are routed through the alias map first (an import that
/// names an alias resolves to its target), deduplicated, and filtered to
/// those not yet linked, so re-running ensure over an unchanged project is
/// a no-op rather than a `LinkAlreadyExists` failure. URLs that match no
/// tracked module stay in the batch so the reducer reports them.
pub fn ensure_actions(config: &Config, observed: &BTreeSet<String>) -> Vec<Action> {
    let mut urls = BTreeSet::new();
    for url in observed {
        match config.aliases.get(url) {
            Some(target) => urls.insert(target.clone()),
            None => urls.insert(url.clone()),
        };
    }

    urls.into_iter()
        .filter(|url| !config.has_link(url))
        .map(|url| Action::AddLink { url })
        .collect()
}

/// First prune pass: every tracked link whose URL is neither observed in
/// source nor kept alive as an alias target.
pub fn prune_link_actions(config: &Config, observed: &BTreeSet<String>) -> Vec<Action> {
    let alias_targets: BTreeSet<&str> =
        config.aliases.values().map(String::as_str).collect();

    let mut actions = Vec::new();
    for module in &config.modules {
        for file in &module.files {
            let url = format!("{}{}", module.url(), file);
            if !observed.contains(&url) && !alias_targets.contains(url.as_str()) {
                actions.push(Action::RemoveLink { url });
            }
        }
    }
    actions
}

/// Second prune pass: modules left with no tracked files. Emptiness is
/// only decidable on the config produced by applying the first pass, so
/// the two passes are applied sequentially, never merged.
pub fn prune_module_actions(config: &Config) -> Vec<Action> {
    config
        .modules
        .iter()
        .filter(|module| module.files.is_empty())
        .map(|module| Action::RemoveModule {
            protocol: module.protocol.clone(),
            path: module.path.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Module;
    use crate::store;
    use std::collections::BTreeMap;

    fn module(path: &str, version: &str, files: &[&str]) -> Module {
        Module {
            protocol: "https".to_string(),
            path: path.to_string(),
            version: version.to_string(),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn observed(urls: &[&str]) -> BTreeSet<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_ensure_emits_missing_links_only() {
        let config = Config {
            modules: vec![module("example.com/a", "1.0.0", &["/mod.ts"])],
            aliases: BTreeMap::new(),
        };

        let actions = ensure_actions(
            &config,
            &observed(&[
                "https://example.com/a/mod.ts",
                "https://example.com/a/util.ts",
            ]),
        );

        assert_eq!(
            actions,
            vec![Action::AddLink {
                url: "https://example.com/a/util.ts".to_string(),
            }]
        );
    }

    #[test]
    fn test_ensure_is_noop_when_converged() {
        let config = Config {
            modules: vec![module("example.com/a", "1.0.0", &["/mod.ts"])],
            aliases: BTreeMap::new(),
        };

        let actions = ensure_actions(&config, &observed(&["https://example.com/a/mod.ts"]));
        assert!(actions.is_empty());
    }

    #[test]
    fn test_ensure_substitutes_alias_targets() {
        let config = Config {
            modules: vec![module("example.com/a", "1.0.0", &[])],
            aliases: BTreeMap::from([(
                "a.ts".to_string(),
                "https://example.com/a/mod.ts".to_string(),
            )]),
        };

        let actions = ensure_actions(&config, &observed(&["a.ts"]));
        assert_eq!(
            actions,
            vec![Action::AddLink {
                url: "https://example.com/a/mod.ts".to_string(),
            }]
        );
    }

    #[test]
    fn test_ensure_keeps_unknown_urls_for_the_reducer() {
        let config = Config {
            modules: vec![],
            aliases: BTreeMap::new(),
        };

        let actions = ensure_actions(&config, &observed(&["https://unknown.test/lib/mod.ts"]));
        assert_eq!(actions.len(), 1);

        let err = store::apply(&config, &actions).unwrap_err();
        assert!(matches!(err, crate::Error::ModuleNotFound { .. }));
    }

    #[test]
    fn test_prune_links_keeps_observed_and_alias_targets() {
        let config = Config {
            modules: vec![module(
                "example.com/a",
                "1.0.0",
                &["/mod.ts", "/util.ts", "/stale.ts"],
            )],
            aliases: BTreeMap::from([(
                "util.ts".to_string(),
                "https://example.com/a/util.ts".to_string(),
            )]),
        };

        let actions = prune_link_actions(&config, &observed(&["https://example.com/a/mod.ts"]));
        assert_eq!(
            actions,
            vec![Action::RemoveLink {
                url: "https://example.com/a/stale.ts".to_string(),
            }]
        );
    }

    #[test]
    fn test_prune_modules_after_link_pass() {
        // A single-file module whose link is stale must be removed by the
        // same prune run: emptiness shows up only after the link pass.
        let config = Config {
            modules: vec![
                module("example.com/a", "1.0.0", &["/mod.ts"]),
                module("example.com/b", "1.0.0", &["/mod.ts"]),
            ],
            aliases: BTreeMap::new(),
        };

        let link_actions =
            prune_link_actions(&config, &observed(&["https://example.com/b/mod.ts"]));
        assert_eq!(prune_module_actions(&config), vec![], "nothing empty yet");

        let after_links = store::apply(&config, &link_actions).unwrap();
        let module_actions = prune_module_actions(&after_links);
        assert_eq!(
            module_actions,
            vec![Action::RemoveModule {
                protocol: "https".to_string(),
                path: "example.com/a".to_string(),
            }]
        );

        let after_modules = store::apply(&after_links, &module_actions).unwrap();
        assert_eq!(after_modules.modules.len(), 1);
        assert_eq!(after_modules.modules[0].path, "example.com/b");
    }
}
