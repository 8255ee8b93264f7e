//! `myps kill`: confirm, connect, list, then terminate row by row.
//!
//! Listing and killing are not transactional against the live session table,
//! so a session that ended on its own in between counts as killed. Any other
//! terminate failure stops the loop; sessions already killed stay killed.

use std::future::Future;
use std::io::{BufRead, Write};

use myps_core::{CompiledFilter, SessionTable, Termination};
use tracing::debug;

use crate::cli::KillArgs;
use crate::commands::confirm::confirm;
use crate::commands::{Outcome, compile_filter, open_table};
use crate::output::{IdLabel, LineFormatter, Palette};

/// Handle `myps kill`.
pub async fn handle(args: &KillArgs, palette: Option<Palette>) -> anyhow::Result<Outcome> {
    let session = &args.session;
    let filter = compile_filter(session, "kill")?;
    let plan = KillPlan {
        filter: &filter,
        formatter: LineFormatter::new(session.display.full, palette),
        assume_yes: args.yes,
        prompt_palette: palette,
    };

    let mut input = std::io::stdin().lock();
    run(&plan, &mut input, &mut std::io::stdout(), || {
        open_table(&session.connection)
    })
    .await
}

/// Everything the kill workflow needs besides its I/O handles.
#[derive(Clone, Copy, Debug)]
pub struct KillPlan<'a> {
    pub filter: &'a CompiledFilter,
    pub formatter: LineFormatter,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
    pub prompt_palette: Option<Palette>,
}

/// Confirm (unless told not to), then connect and terminate every match.
///
/// Nothing connects when confirmation is declined.
pub async fn run<R, W, T, C, Fut>(
    plan: &KillPlan<'_>,
    input: &mut R,
    out: &mut W,
    connect: C,
) -> anyhow::Result<Outcome>
where
    R: BufRead,
    W: Write,
    T: SessionTable,
    C: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    if !plan.assume_yes && !confirm(input, out, plan.prompt_palette)? {
        debug!("kill not confirmed");
        return Ok(Outcome::Declined);
    }

    let mut table = connect().await?;
    let result = terminate_all(&mut table, plan.filter, &plan.formatter, out).await;
    table.close().await;
    result
}

/// List matching sessions and terminate each, printing a `KILLED` line per
/// session acted on.
pub async fn terminate_all<T: SessionTable, W: Write>(
    table: &mut T,
    filter: &CompiledFilter,
    formatter: &LineFormatter,
    out: &mut W,
) -> anyhow::Result<Outcome> {
    let sessions = table.list(filter).await?;

    let mut killed = 0;
    for session in &sessions {
        match table.terminate(session.id).await? {
            Termination::Terminated => {}
            Termination::AlreadyGone => debug!(id = session.id, "already gone, continuing"),
        }
        out.write_all(formatter.format(session, IdLabel::Killed).as_bytes())?;
        killed += 1;
    }
    Ok(Outcome::Killed(killed))
}
