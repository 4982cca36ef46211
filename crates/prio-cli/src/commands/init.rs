use std::path::Path;

use clap::Args;

use prio_store::InitiativeStore;

use super::GlobalArgs;
use crate::config::{self, LoadedConfig, CONFIG_FILE_NAME};
use crate::gate::AccessGate;
use crate::output::kv;

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    force: bool,
}

pub fn run(args: InitArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let path = match &global.config {
        Some(path) => path.clone(),
        None => std::env::current_dir()?.join(CONFIG_FILE_NAME),
    };
    if path.exists() {
        if !args.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }
        authorize_overwrite(&path, global.secret.as_deref())?;
    }

    config::write_default_config(&path)?;
    let loaded = LoadedConfig::from_file(&path)?;
    let db_path = global.db.clone().unwrap_or_else(|| loaded.database_path());
    InitiativeStore::open(&db_path)?;

    println!("Initialized prioritization matrix");
    println!("{}", kv("Config", &path.display().to_string()));
    println!("{}", kv("Database", &db_path.display().to_string()));
    Ok(())
}

/// Replacing a config drops its access secret, so the existing one's gate
/// has to pass first.
fn authorize_overwrite(path: &Path, provided: Option<&str>) -> anyhow::Result<()> {
    let existing = LoadedConfig::from_file(path)?;
    AccessGate::new(existing.access_secret().as_deref()).authorize(provided)
}
