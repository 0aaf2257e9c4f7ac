//! `folio facets`: list the filter options offered for projects.

use crate::cmd::Portfolio;
use crate::output::{OutputMode, Renderable, pretty_kv, pretty_section, render_list, render_mode};
use clap::Args;
use folio_core::facets::{StatusFacet, get_facets, tech_counts};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug, Default)]
pub struct FacetsArgs {
    /// Only list technology facets.
    #[arg(long)]
    pub techs_only: bool,
}

/// One technology facet with the number of projects using it.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TechFacet {
    pub name: String,
    pub projects: usize,
}

#[derive(Debug, Serialize)]
pub struct FacetsView {
    pub techs: Vec<TechFacet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<StatusFacet>,
}

pub fn build_facets(args: &FacetsArgs, portfolio: &Portfolio) -> FacetsView {
    let facets = get_facets(&portfolio.content.projects, &portfolio.statuses);
    let counts = tech_counts(&portfolio.content.projects);
    let techs = facets
        .techs
        .into_iter()
        .map(|name| {
            let projects = counts
                .iter()
                .find(|(tech, _)| *tech == name)
                .map_or(0, |(_, n)| *n);
            TechFacet { name, projects }
        })
        .collect();
    FacetsView {
        techs,
        statuses: if args.techs_only {
            Vec::new()
        } else {
            facets.statuses
        },
    }
}

impl Renderable for TechFacet {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_kv(w, &self.name, format!("{} project(s)", self.projects))
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *w, self).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}  {}", self.name, self.projects)
    }

    fn table_headers() -> &'static [&'static str] {
        &["TECH", "PROJECTS"]
    }
}

/// Execute `folio facets`.
///
/// With `--techs-only` the technologies are rendered as a plain list.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub fn run_facets(args: &FacetsArgs, output: OutputMode, portfolio: &Portfolio) -> anyhow::Result<()> {
    let view = build_facets(args, portfolio);
    if args.techs_only {
        render_list(&view.techs, output)?;
        return Ok(());
    }
    render_mode(output, &view, render_facets_text, render_facets_human)
}

fn render_facets_text(view: &FacetsView, w: &mut dyn Write) -> io::Result<()> {
    for tech in &view.techs {
        writeln!(w, "tech  {}  {}", tech.name, tech.projects)?;
    }
    for status in &view.statuses {
        writeln!(w, "status  {}  {}", status.value, status.label)?;
    }
    Ok(())
}

fn render_facets_human(view: &FacetsView, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Technologies ({})", view.techs.len()))?;
    if view.techs.is_empty() {
        writeln!(w, "(none)")?;
    }
    for tech in &view.techs {
        tech.render_human(w)?;
    }
    if !view.statuses.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Statuses")?;
        for status in &view.statuses {
            pretty_kv(w, &status.value, &status.label)?;
        }
    }
    Ok(())
}
