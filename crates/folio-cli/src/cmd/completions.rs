//! `folio completions`: shell completion scripts.

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};
use std::io::Write;

const BIN_NAME: &str = "folio";

/// Arguments for `folio completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) {
    generate(shell, command, BIN_NAME, out);
}

/// Generate shell completion script to stdout.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_completions(shell, command, &mut out);
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_command() -> clap::Command {
        clap::Command::new(BIN_NAME)
            .subcommand(clap::Command::new("projects"))
            .subcommand(clap::Command::new("timeline"))
    }

    #[test]
    fn bash_script_mentions_subcommands() {
        let mut buf = Vec::new();
        write_completions(Shell::Bash, &mut sample_command(), &mut buf);
        let script = String::from_utf8(buf).expect("utf8");
        assert!(script.contains("folio"));
        assert!(script.contains("projects"));
        assert!(script.contains("timeline"));
    }

    #[test]
    fn zsh_script_has_compdef() {
        let mut buf = Vec::new();
        write_completions(Shell::Zsh, &mut sample_command(), &mut buf);
        let script = String::from_utf8(buf).expect("utf8");
        assert!(script.starts_with("#compdef folio"));
    }
}
