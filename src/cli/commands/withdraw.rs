//! `withdraw` - the withdrawal form.

use crate::{
    cli::now,
    core::withdrawal::{self, MaterialLine, WithdrawalForm},
    errors::Result,
    store::Store,
};
use clap::Args;

/// Record materials and ONTs taken by a team
#[derive(Args, Debug)]
pub struct WithdrawArgs {
    /// Division of the taking team [default: last used]
    #[arg(long)]
    pub division: Option<String>,

    /// Team taking the items [default: last used]
    #[arg(long)]
    pub team: Option<String>,

    /// Material or accessory line, repeatable
    #[arg(long = "item", value_name = "NAME=QTY")]
    pub items: Vec<MaterialLine>,

    /// ONT serial number, repeatable
    #[arg(long = "serial", value_name = "SN")]
    pub serials: Vec<String>,
}

/// Submits the form, falling back to the last selection for division and team.
pub fn execute(args: WithdrawArgs, store: &mut Store) -> Result<()> {
    let last = store.last_selection().clone();
    let form = WithdrawalForm {
        division: args.division.unwrap_or(last.division),
        team: args.team.unwrap_or(last.team),
        materials: args.items,
        serials: args.serials,
    };

    let submission = withdrawal::submit_withdrawal(store, &form, now())?;
    println!(
        "Saved {} material line(s) and {} ONT(s) for team '{}' ({}).",
        submission.withdrawals.len(),
        submission.ont_withdrawals.len(),
        form.team.trim(),
        form.division.trim()
    );
    Ok(())
}
