use clap::Args;

use prio_core::InitiativeId;

use super::{Context, GlobalArgs};
use crate::output::prompt_input;

#[derive(Args)]
pub struct RemoveArgs {
    /// Initiative ID
    id: i64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn run(args: RemoveArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let mut ctx = Context::open(global)?;
    let id = InitiativeId::new(args.id);
    let record = ctx.dashboard.store().get(id)?;

    eprintln!(
        "warning: removing initiative {id} ({}) cannot be undone",
        record.name()
    );
    if !args.yes {
        let answer = prompt_input("Type yes to confirm: ")?;
        if !answer.eq_ignore_ascii_case("yes") {
            println!("Remove cancelled.");
            return Ok(());
        }
    }

    let removed = ctx.dashboard.remove(id)?;
    println!("Removed initiative {id} ({})", removed.name());
    Ok(())
}
