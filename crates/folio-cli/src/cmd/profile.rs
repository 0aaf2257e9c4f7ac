//! `folio profile`: identity, about paragraphs, headline stats and contact.

use crate::cmd::Portfolio;
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};
use clap::Args;
use folio_core::model::{Contact, Profile, StatValue};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug, Default)]
pub struct ProfileArgs {}

#[derive(Debug, Serialize)]
pub struct StatRow<'a> {
    pub label: &'static str,
    pub value: &'a StatValue,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView<'a> {
    pub name: String,
    pub profile: &'a Profile,
    pub about: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<&'a str>,
    pub stats: Vec<StatRow<'a>>,
    pub contact: &'a Contact,
    pub interests: &'a [String],
}

pub fn build_profile(portfolio: &Portfolio) -> ProfileView<'_> {
    let content = &portfolio.content;
    ProfileView {
        name: content.profile.full_name(),
        profile: &content.profile,
        about: content.about.paragraphs(),
        resume_url: content.about.resume_url.as_deref(),
        stats: content
            .stats
            .rows()
            .into_iter()
            .map(|(label, value)| StatRow { label, value })
            .collect(),
        contact: &content.contact,
        interests: &content.interests,
    }
}

/// Execute `folio profile`.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub fn run_profile(_args: &ProfileArgs, output: OutputMode, portfolio: &Portfolio) -> anyhow::Result<()> {
    let view = build_profile(portfolio);
    render_mode(output, &view, render_profile_text, render_profile_human)
}

fn render_profile_text(view: &ProfileView<'_>, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "name  {}", view.name)?;
    writeln!(w, "title  {}", view.profile.job_title)?;
    writeln!(w, "email  {}", view.profile.email)?;
    if let Some(ref url) = view.profile.github_url {
        writeln!(w, "github  {url}")?;
    }
    if let Some(ref url) = view.profile.linkedin_url {
        writeln!(w, "linkedin  {url}")?;
    }
    for stat in &view.stats {
        writeln!(w, "stat  {}  {}", stat.label, stat.value)?;
    }
    if !view.interests.is_empty() {
        writeln!(w, "interests  {}", view.interests.join(","))?;
    }
    Ok(())
}

fn render_profile_human(view: &ProfileView<'_>, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", view.name)?;
    writeln!(w, "{}", view.profile.job_title)?;
    if !view.profile.tagline.is_empty() {
        writeln!(w, "{}", view.profile.tagline)?;
    }
    pretty_rule(w)?;

    for paragraph in &view.about {
        writeln!(w, "{paragraph}")?;
        writeln!(w)?;
    }
    if let Some(url) = view.resume_url {
        pretty_kv(w, "CV", url)?;
        writeln!(w)?;
    }

    pretty_section(w, "Chiffres clés")?;
    for stat in &view.stats {
        writeln!(w, "{:>6}  {}", stat.value.to_string(), stat.label)?;
    }
    writeln!(w)?;

    pretty_section(w, "Contact")?;
    pretty_kv(w, "Email", &view.profile.email)?;
    if let Some(ref phone) = view.profile.phone {
        pretty_kv(w, "Téléphone", phone)?;
    }
    if let Some(ref url) = view.profile.github_url {
        pretty_kv(w, "GitHub", url)?;
    }
    if let Some(ref url) = view.profile.linkedin_url {
        pretty_kv(w, "LinkedIn", url)?;
    }
    if let Some(ref availability) = view.contact.availability {
        pretty_kv(w, "Dispo", availability)?;
    }
    if let Some(ref response) = view.contact.response_time {
        pretty_kv(w, "Réponse", response)?;
    }
    if !view.interests.is_empty() {
        writeln!(w)?;
        writeln!(w, "Intérêts: {}", view.interests.join(", "))?;
    }
    Ok(())
}
