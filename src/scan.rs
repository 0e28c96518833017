use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Directory names never scanned for imports.
pub const DEFAULT_EXCLUDES: &[&str] = &["vendor", "node_modules", ".git"];

const SOURCE_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx"];

/// Merge caller-provided exclude directories with the defaults.
pub fn with_default_excludes(extra: Vec<String>) -> Vec<String> {
    let mut excludes: Vec<String> = DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect();
    for dir in extra {
        if !excludes.contains(&dir) {
            excludes.push(dir);
        }
    }
    excludes
}

/// Walk the project tree and collect every vendor-path import, mapped back
/// to its fully qualified module-file URL.
///
/// An import like `./vendor/https/deno.land/x/dejs/mod.ts` is observed as
/// `https://deno.land/x/dejs/mod.ts`. Non-vendor imports are ignored.
pub fn scan(root: &Path, excludes: &[String]) -> Result<BTreeSet<String>> {
    let import_re = Regex::new(r#"(?:import|export)\s+[^'"`]*?['"`]([^'"`]+)['"`]"#)
        .expect("valid import pattern");

    let mut observed = BTreeSet::new();
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        let name = entry.file_name().to_string_lossy();
        !(entry.file_type().is_dir() && excludes.iter().any(|e| e.as_str() == name))
    });

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            Error::RepositoryIo {
                path,
                source: io::Error::from(e),
            }
        })?;

        if !entry.file_type().is_file() || !is_source_file(entry.path()) {
            continue;
        }

        let body = fs::read_to_string(entry.path()).map_err(|e| Error::RepositoryIo {
            path: entry.path().to_path_buf(),
            source: e,
        })?;

        for caps in import_re.captures_iter(&body) {
            if let Some(url) = vendor_url(&caps[1]) {
                observed.insert(url);
            }
        }
    }

    debug!(count = observed.len(), "observed vendor imports");
    Ok(observed)
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
}

/// Map a vendor-relative import specifier back to a module URL: strip
/// everything through `vendor/`, then turn the leading path component
/// back into a scheme.
fn vendor_url(specifier: &str) -> Option<String> {
    let (_, rest) = specifier.split_once("vendor/")?;
    let (scheme, remainder) = rest.split_once('/')?;
    Some(format!("{scheme}://{remainder}"))
}
