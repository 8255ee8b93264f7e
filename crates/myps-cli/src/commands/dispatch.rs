use crate::cli::Commands;
use crate::commands::{Outcome, grep, kill};
use crate::ui;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(command: &Commands) -> anyhow::Result<Outcome> {
    let palette = ui::palette();
    match command {
        Commands::Grep(args) => grep::handle(args, palette).await,
        Commands::Kill(args) => kill::handle(args, palette).await,
    }
}
