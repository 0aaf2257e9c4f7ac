//! `folio project`: show one project card in full.

use crate::cmd::Portfolio;
use crate::output::{OutputMode, Renderable, pretty_kv, pretty_rule, render_item};
use clap::Args;
use folio_core::model::ProjectEntry;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Numeric project id.
    pub id: u32,
}

/// Borrowed project wrapper implementing all render modes.
#[derive(Debug)]
pub struct ProjectCard<'a>(pub &'a ProjectEntry);

impl Renderable for ProjectCard<'_> {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let p = self.0;
        writeln!(w, "{}", p.title)?;
        pretty_rule(w)?;
        pretty_kv(w, "ID", p.id.to_string())?;
        pretty_kv(w, "Status", &p.status)?;
        pretty_kv(w, "Stack", p.tech_stack.join(", "))?;
        if let Some(ref url) = p.links.github_url {
            pretty_kv(w, "GitHub", url)?;
        }
        if let Some(ref url) = p.links.live_url {
            pretty_kv(w, "Live", url)?;
        }
        if !p.description.is_empty() {
            writeln!(w)?;
            writeln!(w, "{}", p.description)?;
        }
        if !p.highlights.is_empty() {
            writeln!(w)?;
            for highlight in &p.highlights {
                writeln!(w, "  • {highlight}")?;
            }
        }
        Ok(())
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *w, self.0).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        let p = self.0;
        writeln!(w, "{}  {}  {}", p.id, p.status, p.title)?;
        writeln!(w, "stack  {}", p.tech_stack.join(","))?;
        if let Some(ref url) = p.links.github_url {
            writeln!(w, "github  {url}")?;
        }
        if let Some(ref url) = p.links.live_url {
            writeln!(w, "live  {url}")?;
        }
        for highlight in &p.highlights {
            writeln!(w, "highlight  {highlight}")?;
        }
        Ok(())
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "STATUS", "TITLE"]
    }
}

/// Execute `folio project <id>`.
///
/// # Errors
///
/// Returns `ProjectNotFound` for unknown ids, or an error if writing fails.
pub fn run_project(args: &ProjectArgs, output: OutputMode, portfolio: &Portfolio) -> anyhow::Result<()> {
    let project = portfolio.content.project(args.id)?;
    render_item(&ProjectCard(project), output)?;
    Ok(())
}
