//! Merge of experiences and certifications into one timeline.
//!
//! Items are ordered by raw numeric id, descending, through a single
//! comparator shared by both kinds. The id stands in for chronology; date
//! strings are never parsed. Equal ids keep concatenation order
//! (experiences first) because the sort is stable.

use serde::Serialize;

use crate::expand::{EntryKind, ExpandKey};
use crate::model::{CertificationEntry, ExperienceEntry};

/// One merged entry, borrowing its source record unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TimelineItem<'a> {
    Experience(&'a ExperienceEntry),
    Certification(&'a CertificationEntry),
}

impl TimelineItem<'_> {
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Experience(_) => EntryKind::Experience,
            Self::Certification(_) => EntryKind::Certification,
        }
    }

    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Self::Experience(e) => e.id,
            Self::Certification(c) => c.id,
        }
    }

    #[must_use]
    pub const fn key(&self) -> ExpandKey {
        ExpandKey::new(self.kind(), self.id())
    }

    /// `position @ company` or `title — issuer`.
    #[must_use]
    pub fn headline(&self) -> String {
        match self {
            Self::Experience(e) => format!("{} @ {}", e.position, e.company),
            Self::Certification(c) if c.issuer.is_empty() => c.title.clone(),
            Self::Certification(c) => format!("{} — {}", c.title, c.issuer),
        }
    }

    /// The display period: `period` for experiences, `date` for certifications.
    #[must_use]
    pub fn when(&self) -> &str {
        match self {
            Self::Experience(e) => &e.period,
            Self::Certification(c) => &c.date,
        }
    }
}

/// Concatenate both collections and stable-sort by id, highest first.
#[must_use]
pub fn merge_timeline<'a>(
    experiences: &'a [ExperienceEntry],
    certifications: &'a [CertificationEntry],
) -> Vec<TimelineItem<'a>> {
    let mut items: Vec<TimelineItem<'a>> = experiences
        .iter()
        .map(TimelineItem::Experience)
        .chain(certifications.iter().map(TimelineItem::Certification))
        .collect();
    items.sort_by(|a, b| b.id().cmp(&a.id()));
    tracing::debug!(
        experiences = experiences.len(),
        certifications = certifications.len(),
        "merged timeline"
    );
    items
}
