// Public API
pub mod cli;
pub mod commands;
pub mod ui;

// Core domain types
mod actions;
mod config;
mod error;
mod module;
mod project;
mod reconcile;
mod repository;
pub mod scan;
mod store;

// Re-export main types
pub use actions::Action;
pub use config::{Config, CONFIG_FILE};
pub use error::{Error, Result};
pub use module::Module;
pub use project::Project;
pub use repository::{Repository, VendorDir, VENDOR_DIR};
