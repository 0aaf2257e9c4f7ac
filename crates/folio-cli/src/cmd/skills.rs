//! `folio skills`: skills grouped under the fixed category headings.

use crate::cmd::Portfolio;
use crate::output::{OutputMode, pretty_section, render_mode};
use clap::Args;
use folio_core::model::Skill;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug, Default)]
pub struct SkillsArgs {
    /// Include categories that have no skills.
    #[arg(long)]
    pub show_empty: bool,
}

#[derive(Debug, Serialize)]
pub struct SkillGroup<'a> {
    pub key: &'static str,
    pub title: &'static str,
    pub skills: &'a [Skill],
}

pub fn build_skills<'a>(args: &SkillsArgs, portfolio: &'a Portfolio) -> Vec<SkillGroup<'a>> {
    portfolio
        .content
        .skills
        .grouped()
        .into_iter()
        .filter(|(_, skills)| args.show_empty || !skills.is_empty())
        .map(|(category, skills)| SkillGroup {
            key: category.key,
            title: category.title,
            skills,
        })
        .collect()
}

/// Execute `folio skills`.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub fn run_skills(args: &SkillsArgs, output: OutputMode, portfolio: &Portfolio) -> anyhow::Result<()> {
    let groups = build_skills(args, portfolio);
    render_mode(
        output,
        &groups,
        |g, w| render_skills_text(g, w),
        |g, w| render_skills_human(g, w),
    )
}

fn skill_label(skill: &Skill) -> String {
    skill
        .level
        .as_ref()
        .map_or_else(|| skill.name.clone(), |level| format!("{} ({level})", skill.name))
}

fn render_skills_text(groups: &[SkillGroup<'_>], w: &mut dyn Write) -> io::Result<()> {
    for group in groups {
        let names: Vec<String> = group.skills.iter().map(skill_label).collect();
        writeln!(w, "{}  {}", group.key, names.join(","))?;
    }
    Ok(())
}

fn render_skills_human(groups: &[SkillGroup<'_>], w: &mut dyn Write) -> io::Result<()> {
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        pretty_section(w, group.title)?;
        if group.skills.is_empty() {
            writeln!(w, "(aucune)")?;
        }
        for skill in group.skills {
            writeln!(w, "  • {}", skill_label(skill))?;
        }
    }
    Ok(())
}
