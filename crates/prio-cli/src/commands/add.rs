use clap::Args;

use prio_core::form::DEFAULT_SCORE;
use prio_core::InitiativeDraft;

use super::{Context, GlobalArgs};
use crate::output::kv;

#[derive(Args)]
pub struct AddArgs {
    /// Initiative name
    #[arg(short, long)]
    name: String,
    /// Impact score, 0-10
    #[arg(short, long, default_value_t = DEFAULT_SCORE)]
    impact: i64,
    /// Feasibility score, 0-10
    #[arg(short, long, default_value_t = DEFAULT_SCORE)]
    feasibility: i64,
    /// Work stream (e.g. "Service Desk", finance)
    #[arg(short, long)]
    work_stream: String,
    /// Time horizon (e.g. "Short term", long-term)
    #[arg(short = 't', long)]
    horizon: String,
    /// Free-form description
    #[arg(short, long)]
    description: Option<String>,
}

pub fn run(args: AddArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let mut ctx = Context::open(global)?;
    let draft = InitiativeDraft {
        id: None,
        name: args.name,
        impact: args.impact,
        feasibility: args.feasibility,
        work_stream: args.work_stream,
        time_horizon: args.horizon,
        description: args.description,
    };
    let id = ctx.dashboard.submit(&draft)?.id();
    let record = ctx.dashboard.store().get(id)?;

    println!("Created initiative {id}");
    println!("{}", kv("Name", record.name()));
    println!("{}", kv("Work stream", record.work_stream().as_str()));
    println!("{}", kv("Time horizon", record.time_horizon().as_str()));
    Ok(())
}
