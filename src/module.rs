use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::{Error, Result};

/// A versioned external source unit.
///
/// Identity is `(protocol, path)`; two modules with the same identity but
/// different versions are the same logical module at different points in
/// time and never coexist in a config. `files` records the module files
/// that have been linked locally, each path starting with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub protocol: String,
    pub path: String,
    pub version: String,
    pub files: Vec<String>,
}

impl Module {
    /// Parse a fully qualified module URL of the form
    /// `protocol://host/stem@version`, e.g. `https://deno.land/x/dejs@0.3.0/`.
    ///
    /// Anything after the version segment is ignored, so a module-file URL
    /// also parses to its module. The version segment is mandatory.
    pub fn parse(input: &str) -> Result<Self> {
        let parsed = Url::parse(input).map_err(|e| Error::InvalidModuleUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;

        let host = parsed.host_str().ok_or_else(|| Error::InvalidModuleUrl {
            url: input.to_string(),
            reason: "missing host".to_string(),
        })?;

        let stem_version = Regex::new(r"^([^@]+)@([^/]+)/?").expect("valid module pattern");
        let caps = stem_version
            .captures(parsed.path())
            .ok_or_else(|| Error::InvalidModuleUrl {
                url: input.to_string(),
                reason: "missing @version segment".to_string(),
            })?;

        Ok(Self {
            protocol: parsed.scheme().to_string(),
            path: format!("{}{}", host, &caps[1]),
            version: caps[2].to_string(),
            files: Vec::new(),
        })
    }

    /// Canonical string form without version (`protocol://path`). This is
    /// the prefix that module-file URLs are matched against.
    pub fn url(&self) -> String {
        format!("{}://{}", self.protocol, self.path)
    }

    /// String form including the pinned version.
    pub fn url_with_version(&self) -> String {
        format!("{}://{}@{}", self.protocol, self.path, self.version)
    }

    /// Whether `other` names the same logical module, regardless of version.
    pub fn same_identity(&self, other: &Module) -> bool {
        self.protocol == other.protocol && self.path == other.path
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.protocol, self.path)
    }
}
