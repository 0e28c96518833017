use clap::{Parser, Subcommand};

/// Vendored module manager
///
/// vend tracks remote, versioned modules in `vend.json` and generates
/// re-export shims under `vendor/` so project imports go through stable,
/// pinned local paths. Pin a module version once; every local reference
/// regenerates consistently when the version changes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty vend.json in the current directory
    Init,

    /// Track a new module pinned at a version
    Add {
        /// Module URL including version, e.g. https://deno.land/x/dejs@0.3.0/
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Create a vendor link for a module file
    Link {
        /// Module file URL without version, e.g. https://deno.land/x/dejs/mod.ts
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Change a module's pinned version and regenerate its links
    Update {
        /// Module URL carrying the new version
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Remove a vendor link
    Unlink {
        /// Module file URL without version
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Stop tracking a module and delete its vendor directory
    Remove {
        /// Module URL, e.g. https://deno.land/x/dejs@0.3.0/
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Re-export a module file through a stable local path
    Alias {
        /// Module file URL without version
        #[arg(value_name = "TARGET")]
        target: String,

        /// Local path for the alias shim, e.g. deps/dejs.ts
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Remove an alias
    Unalias {
        /// Local alias path
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Link every vendor import observed in project source
    Ensure {
        /// Directory names to skip while scanning (added to the defaults)
        #[arg(short, long = "exclude", value_name = "DIR")]
        excludes: Vec<String>,
    },

    /// Remove links no longer imported, then modules with no links left
    Prune {
        /// Directory names to skip while scanning (added to the defaults)
        #[arg(short, long = "exclude", value_name = "DIR")]
        excludes: Vec<String>,
    },

    /// Print version information
    Version,
}
