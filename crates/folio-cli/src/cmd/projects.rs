//! `folio projects`: list projects narrowed by technology and status.
//!
//! Each `--tech` flag is one toggle applied in order, so repeating a tag
//! switches it back off. All selected tags must be present on a project
//! (AND semantics). `--status` replaces the status selection; `all` clears it.

use crate::cmd::Portfolio;
use crate::output::{OutputMode, pretty_rule, pretty_section, render_mode};
use clap::Args;
use folio_core::filter::{FilterState, apply};
use folio_core::model::ProjectEntry;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug, Default)]
pub struct ProjectsArgs {
    /// Toggle a technology tag (repeatable; AND semantics).
    #[arg(long = "tech", short = 't', value_name = "TAG")]
    pub techs: Vec<String>,

    /// Restrict to one status (`all` for no restriction).
    #[arg(long, short = 's', value_name = "STATUS")]
    pub status: Option<String>,
}

impl ProjectsArgs {
    /// Replay the flags as state transitions from the reset state.
    pub fn filter_state(&self) -> FilterState {
        let state = self
            .techs
            .iter()
            .fold(FilterState::reset(), |state, tag| state.toggle_tech(tag));
        match self.status.as_deref() {
            Some(status) => state.set_status(status),
            None => state,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectsView<'a> {
    pub filter: FilterState,
    pub total: usize,
    pub filtered: usize,
    pub projects: Vec<&'a ProjectEntry>,
    #[serde(skip)]
    pub tech_preview: usize,
}

pub fn build_projects<'a>(args: &ProjectsArgs, portfolio: &'a Portfolio) -> ProjectsView<'a> {
    let filter = args.filter_state();
    let result = apply(&portfolio.content.projects, &filter);
    ProjectsView {
        filter,
        total: result.total,
        filtered: result.filtered_count(),
        projects: result.items,
        tech_preview: portfolio.tech_preview,
    }
}

/// Execute `folio projects`.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub fn run_projects(
    args: &ProjectsArgs,
    output: OutputMode,
    portfolio: &Portfolio,
) -> anyhow::Result<()> {
    let view = build_projects(args, portfolio);
    render_mode(output, &view, render_projects_text, render_projects_human)
}

fn describe_filter(filter: &FilterState) -> String {
    let mut parts: Vec<String> = filter
        .selected_techs()
        .iter()
        .map(|t| format!("tech={t}"))
        .collect();
    if !filter.selected_status().is_all() {
        parts.push(format!("status={}", filter.selected_status()));
    }
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(" ")
    }
}

fn tech_line(project: &ProjectEntry, limit: usize) -> String {
    let (shown, hidden) = project.tech_preview(limit);
    let mut line = shown.join(", ");
    if hidden > 0 {
        line.push_str(&format!(" +{hidden}"));
    }
    line
}

fn render_projects_text(view: &ProjectsView<'_>, w: &mut dyn Write) -> io::Result<()> {
    writeln!(
        w,
        "projects ({} / {})  filters: {}",
        view.filtered,
        view.total,
        describe_filter(&view.filter)
    )?;
    for project in &view.projects {
        writeln!(
            w,
            "{}  {}  {}  {}",
            project.id,
            project.status,
            project.title,
            project.tech_stack.join(",")
        )?;
    }
    Ok(())
}

fn render_projects_human(view: &ProjectsView<'_>, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Projets ({} / {})", view.filtered, view.total))?;
    if view.filter.has_active_filters() {
        writeln!(w, "Filtres: {}", describe_filter(&view.filter))?;
        pretty_rule(w)?;
    }
    if view.projects.is_empty() {
        writeln!(w, "Aucun projet ne correspond à ces filtres.")?;
        return Ok(());
    }
    for project in &view.projects {
        writeln!(w, "#{:<4} {}  [{}]", project.id, project.title, project.status)?;
        if !project.description.is_empty() {
            writeln!(w, "      {}", project.description)?;
        }
        writeln!(w, "      {}", tech_line(project, view.tech_preview))?;
        for highlight in &project.highlights {
            writeln!(w, "      • {highlight}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}
