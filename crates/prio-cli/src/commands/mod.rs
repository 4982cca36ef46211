pub mod add;
pub mod browse;
pub mod edit;
pub mod init;
pub mod master;
pub mod remove;
pub mod session;

use std::path::PathBuf;

use clap::{Args, Subcommand};

use prio_core::{Category, Selection};
use prio_store::{InitiativeStore, StoreError};

use crate::config::{self, LoadedConfig};
use crate::dashboard::Dashboard;
use crate::gate::AccessGate;
use crate::render::{render_view, RenderOptions};
use crate::router::View;

/// Flags accepted by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (defaults to the nearest prio.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Database file, overriding the config
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
    /// Access secret (prompted for when the gate is enabled and this is absent)
    #[arg(long, global = true)]
    pub secret: Option<String>,
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and a default prio.toml
    Init(init::InitArgs),
    /// Record a new initiative
    Add(add::AddArgs),
    /// Edit an existing initiative
    Edit(edit::EditArgs),
    /// Delete an initiative
    Remove(remove::RemoveArgs),
    /// Show one work stream's matrix and table
    Browse(browse::BrowseArgs),
    /// Show the matrix across all work streams
    Master(master::MasterArgs),
    /// Interactive dashboard
    Session(session::SessionArgs),
}

impl Commands {
    pub async fn run(self, global: GlobalArgs) -> anyhow::Result<()> {
        match self {
            Commands::Init(args) => init::run(args, &global),
            Commands::Add(args) => add::run(args, &global),
            Commands::Edit(args) => edit::run(args, &global),
            Commands::Remove(args) => remove::run(args, &global),
            Commands::Browse(args) => browse::run(args, &global),
            Commands::Master(args) => master::run(args, &global).await,
            Commands::Session(args) => session::run(args, &global),
        }
    }
}

/// What a view command needs once config is resolved and the gate passed.
pub struct Context {
    pub config: LoadedConfig,
    pub dashboard: Dashboard,
    pub render: RenderOptions,
}

impl Context {
    pub fn open(global: &GlobalArgs) -> anyhow::Result<Self> {
        let config = config::load(global.config.as_deref())?;
        let secret = config.access_secret();
        AccessGate::new(secret.as_deref()).authorize(global.secret.as_deref())?;

        let db_path = global.db.clone().unwrap_or_else(|| config.database_path());
        tracing::debug!(db = %db_path.display(), config = ?config.source, "opening store");
        let store = InitiativeStore::open(&db_path)?;
        let dashboard = Dashboard::new(store, config.config.lock_work_stream_on_edit);
        let render = if config.config.color && !global.no_color {
            RenderOptions { color: true }
        } else {
            RenderOptions::plain()
        };
        Ok(Self {
            config,
            dashboard,
            render,
        })
    }

    /// Prints `view` as a terminal page, or as the chart payload in JSON.
    pub fn print_view(&self, view: View, json: bool) -> anyhow::Result<()> {
        print_view(&self.dashboard, self.render, view, json)
    }
}

pub fn print_view(
    dashboard: &Dashboard,
    render: RenderOptions,
    view: View,
    json: bool,
) -> anyhow::Result<()> {
    let model = dashboard.view_model(view);
    if json {
        println!("{}", serde_json::to_string_pretty(&model.payload())?);
    } else {
        print!("{}", render_view(&model, render));
    }
    Ok(())
}

/// Parses a filter selector argument, reporting bad input as a validation
/// failure.
pub fn parse_selection<T: Category>(value: &str) -> Result<Selection<T>, StoreError> {
    Selection::parse(value).map_err(StoreError::Validation)
}
