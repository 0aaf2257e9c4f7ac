#![forbid(unsafe_code)]

mod cmd;
mod output;
mod tui;

use clap::{CommandFactory, Parser, Subcommand};
use cmd::Portfolio;
use folio_core::config::resolve_config;
use output::{CliError, OutputMode, render_error};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "folio: a portfolio you can filter from the terminal",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Portfolio document (JSON or YAML). Defaults to ./portfolio.json.
    #[arg(long, global = true, value_name = "PATH")]
    content: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Log directive used when `FOLIO_LOG` is unset.
    fn default_log_directive(&self) -> &'static str {
        if self.quiet || matches!(self.command, Commands::Explore(_)) {
            "error"
        } else if self.verbose || env::var("DEBUG").is_ok() {
            "folio=debug,info"
        } else {
            "folio=info,warn"
        }
    }

    /// Output mode known from flags alone, before any config is read.
    fn flag_output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Projects",
        about = "List filter facets",
        long_about = "List the technology tags found across projects and the fixed status options.",
        after_help = "EXAMPLES:\n    # Show every facet\n    folio facets\n\n    # Technologies only, as JSON\n    folio facets --techs-only --json"
    )]
    Facets(cmd::facets::FacetsArgs),

    #[command(
        next_help_heading = "Projects",
        about = "List projects",
        long_about = "List projects matching every selected technology and the selected status.",
        after_help = "EXAMPLES:\n    # Projects using both Docker and Node\n    folio projects --tech Docker --tech Node\n\n    # Only projects in production\n    folio projects --status \"En production\"\n\n    # Emit machine-readable output\n    folio projects --tech React --json"
    )]
    Projects(cmd::projects::ProjectsArgs),

    #[command(
        next_help_heading = "Projects",
        about = "Show one project",
        long_about = "Show the full card for a single project by numeric id.",
        after_help = "EXAMPLES:\n    # Show project 3\n    folio project 3\n\n    # Emit machine-readable output\n    folio project 3 --json"
    )]
    Project(cmd::project::ProjectArgs),

    #[command(
        next_help_heading = "Career",
        about = "Show the career timeline",
        long_about = "Show experiences and certifications merged into one timeline, newest id first.",
        after_help = "EXAMPLES:\n    # Collapsed timeline\n    folio timeline\n\n    # Expand one experience and one certification\n    folio timeline --expand experience:3 --expand cert:7\n\n    # Everything expanded\n    folio timeline --all"
    )]
    Timeline(cmd::timeline::TimelineArgs),

    #[command(
        next_help_heading = "Profile",
        about = "Show profile and stats",
        long_about = "Show identity, about paragraphs, headline stats and contact details."
    )]
    Profile(cmd::profile::ProfileArgs),

    #[command(
        next_help_heading = "Profile",
        about = "Show skills by category",
        long_about = "Show skills grouped under the fixed category headings.",
        after_help = "EXAMPLES:\n    # Skills with data\n    folio skills\n\n    # Include empty categories\n    folio skills --show-empty"
    )]
    Skills(cmd::skills::SkillsArgs),

    #[command(
        next_help_heading = "Interactive",
        about = "Open the interactive explorer",
        long_about = "Browse projects with live facet filtering and expand timeline entries in a full-screen view."
    )]
    Explore(cmd::explore::ExploreArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    folio completions bash > ~/.local/share/bash-completion/completions/folio"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new(default_directive));

    let format = env::var("FOLIO_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: &mut OutputMode) -> anyhow::Result<()> {
    if let Commands::Completions(ref args) = cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let project_root = env::current_dir()?;
    let config = resolve_config(&project_root, cli.content.as_deref(), cli.json)?;
    *output = cli
        .format
        .unwrap_or_else(|| OutputMode::from_resolved(&config.resolved_output));

    if cli.verbose {
        info!(
            content = %config.content_path.display(),
            output = ?output,
            "resolved configuration"
        );
    }

    let portfolio = Portfolio::open(&config)?;
    let output = *output;

    match cli.command {
        Commands::Facets(ref args) => cmd::facets::run_facets(args, output, &portfolio),
        Commands::Projects(ref args) => cmd::projects::run_projects(args, output, &portfolio),
        Commands::Project(ref args) => cmd::project::run_project(args, output, &portfolio),
        Commands::Timeline(ref args) => cmd::timeline::run_timeline(args, output, &portfolio),
        Commands::Profile(ref args) => cmd::profile::run_profile(args, output, &portfolio),
        Commands::Skills(ref args) => cmd::skills::run_skills(args, output, &portfolio),
        Commands::Explore(ref args) => cmd::explore::run_explore(args, &portfolio),
        Commands::Completions(_) => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.default_log_directive());

    let mut output = cli.flag_output_mode();
    match run(&cli, &mut output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            if render_error(output, &CliError::from(&err)).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
