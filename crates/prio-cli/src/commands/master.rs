use std::future::Future;
use std::time::Duration;

use clap::Args;
use tokio::time::MissedTickBehavior;

use prio_core::FilterSet;

use super::{parse_selection, print_view, Context, GlobalArgs};
use crate::dashboard::Dashboard;
use crate::output::CLEAR_SCREEN;
use crate::router::View;

#[derive(Args)]
pub struct MasterArgs {
    /// Work stream, or "all"
    #[arg(short, long, default_value = "All")]
    work_stream: String,
    /// Time horizon, or "all"
    #[arg(short = 't', long, default_value = "All")]
    horizon: String,
    /// Redraw on a timer until interrupted
    #[arg(long)]
    watch: bool,
    /// Seconds between refreshes (defaults to refresh_interval_secs)
    #[arg(long, requires = "watch", value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,
    /// Emit the chart payload as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: MasterArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let filters = FilterSet {
        work_stream: parse_selection(&args.work_stream)?,
        time_horizon: parse_selection(&args.horizon)?,
    };

    let mut ctx = Context::open(global)?;
    ctx.dashboard.set_filters(filters);

    if !args.watch {
        ctx.dashboard.refresh()?;
        return ctx.print_view(View::Master, args.json);
    }

    let secs = args
        .interval
        .unwrap_or(ctx.config.config.refresh_interval_secs);
    tracing::info!(interval_secs = secs, "watching master view");

    let render = ctx.render;
    let json = args.json;
    let frames = watch(
        &mut ctx.dashboard,
        Duration::from_secs(secs),
        tokio::signal::ctrl_c(),
        |dashboard| {
            if !json {
                print!("{CLEAR_SCREEN}");
            }
            print_view(dashboard, render, View::Master, json)
        },
    )
    .await?;
    tracing::info!(frames, "watch interrupted");
    Ok(())
}

/// Refreshes and draws a frame on every tick until `stop` resolves. Returns
/// the number of frames drawn.
///
/// `stop` is polled across iterations, so a stop request that arrives while a
/// frame is being drawn ends the loop before the next one.
pub async fn watch<S, F>(
    dashboard: &mut Dashboard,
    period: Duration,
    stop: S,
    mut frame: F,
) -> anyhow::Result<usize>
where
    S: Future,
    F: FnMut(&Dashboard) -> anyhow::Result<()>,
{
    // Ticks never pile up: a slow refresh pushes the next one back.
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(stop);

    let mut frames = 0;
    loop {
        tokio::select! {
            biased;
            _ = &mut stop => break,
            _ = ticker.tick() => {
                if let Err(e) = dashboard.refresh() {
                    if !dashboard.is_loaded() {
                        return Err(e.into());
                    }
                    tracing::warn!(error = %e, "refresh failed, showing last snapshot");
                }
                frame(dashboard)?;
                frames += 1;
            }
        }
    }
    Ok(frames)
}
