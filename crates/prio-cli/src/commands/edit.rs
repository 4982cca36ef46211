use clap::Args;

use prio_core::InitiativeId;

use super::{Context, GlobalArgs};
use crate::output::kv;

#[derive(Args)]
pub struct EditArgs {
    /// Initiative ID
    id: i64,
    /// New name
    #[arg(short, long)]
    name: Option<String>,
    /// New impact score, 0-10
    #[arg(short, long)]
    impact: Option<i64>,
    /// New feasibility score, 0-10
    #[arg(short, long)]
    feasibility: Option<i64>,
    /// New work stream (rejected unless lock_work_stream_on_edit = false)
    #[arg(short, long)]
    work_stream: Option<String>,
    /// New time horizon
    #[arg(short = 't', long)]
    horizon: Option<String>,
    /// New description
    #[arg(short, long, conflicts_with = "clear_description")]
    description: Option<String>,
    /// Remove the description
    #[arg(long)]
    clear_description: bool,
}

pub fn run(args: EditArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let mut ctx = Context::open(global)?;
    let id = InitiativeId::new(args.id);
    let mut draft = ctx.dashboard.load_for_edit(id)?;

    if let Some(name) = args.name {
        draft.name = name;
    }
    if let Some(impact) = args.impact {
        draft.impact = impact;
    }
    if let Some(feasibility) = args.feasibility {
        draft.feasibility = feasibility;
    }
    if let Some(work_stream) = args.work_stream {
        draft.work_stream = work_stream;
    }
    if let Some(horizon) = args.horizon {
        draft.time_horizon = horizon;
    }
    if args.clear_description {
        draft.description = None;
    } else if let Some(description) = args.description {
        draft.description = Some(description);
    }

    ctx.dashboard.submit(&draft)?;
    let record = ctx.dashboard.store().get(id)?;

    println!("Updated initiative {id}");
    println!("{}", kv("Name", record.name()));
    println!("{}", kv("Impact", &record.fields.impact.to_string()));
    println!("{}", kv("Feasibility", &record.fields.feasibility.to_string()));
    println!("{}", kv("Time horizon", record.time_horizon().as_str()));
    Ok(())
}
