//! `folio explore`: open the interactive explorer.

use crate::cmd::Portfolio;
use crate::tui::explorer::run_explorer;
use clap::Args;
use std::io::IsTerminal;

#[derive(Args, Debug, Default)]
pub struct ExploreArgs {}

/// Execute `folio explore`.
///
/// # Errors
///
/// Returns an error if stdout is not a terminal or the TUI fails.
pub fn run_explore(_args: &ExploreArgs, portfolio: &Portfolio) -> anyhow::Result<()> {
    if !std::io::stdout().is_terminal() {
        anyhow::bail!("`folio explore` needs an interactive terminal; use `folio projects` or `folio timeline` instead");
    }
    run_explorer(portfolio)
}
