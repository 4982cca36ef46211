use std::io;

use clap::Args;

use super::{Context, GlobalArgs};
use crate::router::View;
use crate::session::Session;

#[derive(Args)]
pub struct SessionArgs {
    /// Open on the master view instead of the add form
    #[arg(long)]
    master: bool,
}

pub fn run(args: SessionArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let mut ctx = Context::open(global)?;
    let start = if args.master { View::Master } else { View::Add };
    let render = ctx.render;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&mut ctx.dashboard, stdin.lock(), stdout.lock(), render)
        .starting_at(start)
        .run()
}
