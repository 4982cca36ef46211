use clap::Args;

use prio_core::{Category, FilterSet, Selection, TimeHorizon, WorkStream};
use prio_store::StoreError;

use super::{parse_selection, Context, GlobalArgs};
use crate::router::View;

#[derive(Args)]
pub struct BrowseArgs {
    /// Work stream to browse
    #[arg(short, long)]
    work_stream: String,
    /// Time horizon, or "all"
    #[arg(short = 't', long, default_value = "All")]
    horizon: String,
    /// Emit the chart payload as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: BrowseArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let work_stream = WorkStream::parse(&args.work_stream).map_err(StoreError::Validation)?;
    let horizon: Selection<TimeHorizon> = parse_selection(&args.horizon)?;

    let mut ctx = Context::open(global)?;
    ctx.dashboard.set_filters(FilterSet::all().with_time_horizon(horizon));
    ctx.dashboard.refresh()?;
    ctx.print_view(View::Browse(work_stream), args.json)
}
