use crate::cli::{Cli, Commands};
use anyhow::Result;

mod add;
mod alias;
mod ensure;
mod init;
mod link;
mod prune;
mod remove;
mod unalias;
mod unlink;
mod update;
mod version;

pub fn execute(cli: Cli) -> Result<()> {
    // Every command operates on the project rooted at the current directory.
    let root = std::env::current_dir()?;

    match cli.command {
        Commands::Init => init::execute(&root),

        Commands::Add { url } => add::execute(&root, &url),

        Commands::Link { url } => link::execute(&root, &url),

        Commands::Update { url } => update::execute(&root, &url),

        Commands::Unlink { url } => unlink::execute(&root, &url),

        Commands::Remove { url } => remove::execute(&root, &url),

        Commands::Alias { target, path } => alias::execute(&root, &target, &path),

        Commands::Unalias { path } => unalias::execute(&root, &path),

        Commands::Ensure { excludes } => ensure::execute(&root, excludes),

        Commands::Prune { excludes } => prune::execute(&root, excludes),

        Commands::Version => version::execute(),
    }
}
