//! `folio timeline`: merged career timeline with per-entry expansion.

use crate::cmd::Portfolio;
use crate::output::{OutputMode, pretty_section, render_mode};
use clap::Args;
use folio_core::expand::{ExpandKey, ExpandRegistry};
use folio_core::timeline::{TimelineItem, merge_timeline};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug, Default)]
pub struct TimelineArgs {
    /// Toggle details for one entry, as `kind:id` (repeatable).
    #[arg(long = "expand", short = 'e', value_name = "KIND:ID")]
    pub expand: Vec<String>,

    /// Expand every entry.
    #[arg(long, conflicts_with = "expand")]
    pub all: bool,
}

#[derive(Debug, Serialize)]
pub struct TimelineRow<'a> {
    pub key: String,
    pub expanded: bool,
    #[serde(flatten)]
    pub item: TimelineItem<'a>,
}

#[derive(Debug, Serialize)]
pub struct TimelineView<'a> {
    pub entries: Vec<TimelineRow<'a>>,
}

/// Replay each `--expand` value as a toggle from the collapsed state.
///
/// # Errors
///
/// Returns `InvalidExpandKey` for a malformed `kind:id` value.
pub fn expand_registry(args: &TimelineArgs, items: &[TimelineItem<'_>]) -> anyhow::Result<ExpandRegistry> {
    if args.all {
        return Ok(items.iter().fold(ExpandRegistry::new(), |reg, item| {
            if reg.is_key_expanded(item.key()) {
                reg
            } else {
                reg.toggle_key(item.key())
            }
        }));
    }
    let mut registry = ExpandRegistry::new();
    for raw in &args.expand {
        let key: ExpandKey = raw.parse()?;
        registry = registry.toggle_key(key);
    }
    Ok(registry)
}

/// # Errors
///
/// Returns `InvalidExpandKey` for a malformed `kind:id` value.
pub fn build_timeline<'a>(args: &TimelineArgs, portfolio: &'a Portfolio) -> anyhow::Result<TimelineView<'a>> {
    let items = merge_timeline(&portfolio.content.experiences, &portfolio.content.certifications);
    let registry = expand_registry(args, &items)?;
    let entries = items
        .into_iter()
        .map(|item| TimelineRow {
            key: item.key().to_string(),
            expanded: registry.is_key_expanded(item.key()),
            item,
        })
        .collect();
    Ok(TimelineView { entries })
}

/// Execute `folio timeline`.
///
/// # Errors
///
/// Returns an error for malformed `--expand` values or if writing fails.
pub fn run_timeline(args: &TimelineArgs, output: OutputMode, portfolio: &Portfolio) -> anyhow::Result<()> {
    let view = build_timeline(args, portfolio)?;
    render_mode(output, &view, render_timeline_text, render_timeline_human)
}

fn write_details(row: &TimelineRow<'_>, indent: &str, w: &mut dyn Write) -> io::Result<()> {
    match row.item {
        TimelineItem::Experience(e) => {
            if !e.location.is_empty() {
                writeln!(w, "{indent}{}", e.location)?;
            }
            for point in &e.description_points {
                writeln!(w, "{indent}- {point}")?;
            }
            if !e.technologies.is_empty() {
                writeln!(w, "{indent}{}", e.technologies.join(", "))?;
            }
        }
        TimelineItem::Certification(c) => {
            if let Some(ref url) = c.credential_url {
                writeln!(w, "{indent}{url}")?;
            }
        }
    }
    Ok(())
}

fn render_timeline_text(view: &TimelineView<'_>, w: &mut dyn Write) -> io::Result<()> {
    for row in &view.entries {
        let marker = if row.expanded { '-' } else { '+' };
        writeln!(
            w,
            "{marker} {}  {}  {}",
            row.key,
            row.item.when(),
            row.item.headline()
        )?;
        if row.expanded {
            write_details(row, "    ", w)?;
        }
    }
    Ok(())
}

fn render_timeline_human(view: &TimelineView<'_>, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Parcours")?;
    if view.entries.is_empty() {
        writeln!(w, "(vide)")?;
    }
    for row in &view.entries {
        let marker = if row.expanded { '▾' } else { '▸' };
        let when = row.item.when();
        if when.is_empty() {
            writeln!(w, "{marker} {}", row.item.headline())?;
        } else {
            writeln!(w, "{marker} {}  ({when})", row.item.headline())?;
        }
        if row.expanded {
            write_details(row, "    ", w)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::fixture;
    use folio_core::PortfolioContent;
    use folio_core::error::FolioError;
    use folio_core::model::ExperienceEntry;

    fn expand(keys: &[&str]) -> TimelineArgs {
        TimelineArgs {
            expand: keys.iter().map(|k| (*k).to_string()).collect(),
            all: false,
        }
    }

    fn keys<'v>(view: &'v TimelineView<'_>) -> Vec<&'v str> {
        view.entries.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn entries_are_descending_by_id() {
        let portfolio = fixture();
        let view = build_timeline(&TimelineArgs::default(), &portfolio).expect("build");
        assert_eq!(
            keys(&view),
            vec![
                "certification:7",
                "experience:3",
                "experience:2",
                "certification:2"
            ]
        );
        assert!(view.entries.iter().all(|r| !r.expanded));
    }

    #[test]
    fn expanding_one_kind_leaves_same_id_of_other_kind_collapsed() {
        let portfolio = fixture();
        let view = build_timeline(&expand(&["experience:2"]), &portfolio).expect("build");
        let expanded: Vec<&str> = view
            .entries
            .iter()
            .filter(|r| r.expanded)
            .map(|r| r.key.as_str())
            .collect();
        assert_eq!(expanded, vec!["experience:2"]);
    }

    #[test]
    fn repeated_expand_collapses_again() {
        let portfolio = fixture();
        let view = build_timeline(&expand(&["cert:7", "certification:7"]), &portfolio).expect("build");
        assert!(view.entries.iter().all(|r| !r.expanded));
    }

    #[test]
    fn all_expands_everything() {
        let portfolio = fixture();
        let args = TimelineArgs {
            expand: vec![],
            all: true,
        };
        let view = build_timeline(&args, &portfolio).expect("build");
        assert!(view.entries.iter().all(|r| r.expanded));
    }

    #[test]
    fn all_expands_entries_sharing_an_id() {
        let entry = |position: &str| ExperienceEntry {
            id: 4,
            position: position.to_string(),
            company: "Nimbus".to_string(),
            period: String::new(),
            location: String::new(),
            description_points: vec![],
            technologies: vec![],
        };
        let portfolio = Portfolio::from_content(PortfolioContent {
            experiences: vec![entry("Stagiaire"), entry("Développeuse")],
            ..PortfolioContent::default()
        });
        let args = TimelineArgs {
            expand: vec![],
            all: true,
        };
        let view = build_timeline(&args, &portfolio).expect("build");
        assert_eq!(keys(&view), vec!["experience:4", "experience:4"]);
        assert!(view.entries.iter().all(|r| r.expanded));
    }

    #[test]
    fn malformed_key_is_rejected() {
        let portfolio = fixture();
        let err = build_timeline(&expand(&["job:1"]), &portfolio).expect_err("bad kind");
        assert!(matches!(
            err.downcast_ref::<FolioError>(),
            Some(FolioError::InvalidExpandKey { .. })
        ));
    }

    #[test]
    fn expanded_text_shows_details() {
        let portfolio = fixture();
        let view = build_timeline(&expand(&["experience:3"]), &portfolio).expect("build");
        let mut buf = Vec::new();
        render_timeline_text(&view, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("- experience:3  2023 - Présent  Développeuse Full Stack @ Nimbus"));
        assert!(text.contains("    - Migration du front vers React"));
        assert!(text.contains("+ experience:2"));
        assert!(!text.contains("Services de synchronisation"));
    }

    #[test]
    fn json_rows_are_tagged_by_kind() {
        let portfolio = fixture();
        let view = build_timeline(&TimelineArgs::default(), &portfolio).expect("build");
        let json = serde_json::to_value(&view).expect("json");
        assert_eq!(json["entries"][0]["kind"], "certification");
        assert_eq!(json["entries"][0]["key"], "certification:7");
        assert_eq!(json["entries"][1]["company"], "Nimbus");
    }
}
