//! Facet extraction over the project collection.
//!
//! Technology facets are derived from the data. Status facets are a fixed,
//! configured list that always begins with the `all` sentinel; they are never
//! derived from project statuses, so a project whose status is missing from the
//! list is only reachable through `all`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::filter::ALL_STATUS;
use crate::model::ProjectEntry;

/// One selectable status value with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFacet {
    pub value: String,
    pub label: String,
}

impl StatusFacet {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.value == ALL_STATUS
    }
}

/// The built-in status facet list.
#[must_use]
pub fn default_status_facets() -> Vec<StatusFacet> {
    vec![
        StatusFacet::new(ALL_STATUS, "Tous"),
        StatusFacet::new("En production", "En production"),
        StatusFacet::new("Open source", "Open source"),
        StatusFacet::new("En développement", "En développement"),
        StatusFacet::new("Déployé", "Déployé"),
    ]
}

/// Normalize a configured status list: the `all` sentinel comes first exactly
/// once, and later duplicates of a value are dropped.
#[must_use]
pub fn normalize_status_facets(configured: Vec<StatusFacet>) -> Vec<StatusFacet> {
    let mut seen = BTreeSet::new();
    let mut all = None;
    let mut rest = Vec::with_capacity(configured.len());

    for facet in configured {
        if !seen.insert(facet.value.clone()) {
            continue;
        }
        if facet.is_all() {
            all = Some(facet);
        } else {
            rest.push(facet);
        }
    }

    let mut out = Vec::with_capacity(rest.len() + 1);
    out.push(all.unwrap_or_else(|| StatusFacet::new(ALL_STATUS, "Tous")));
    out.extend(rest);
    out
}

/// Legal values for both filter dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facets {
    /// Sorted, deduplicated union of every project's tech stack.
    pub techs: Vec<String>,
    /// Fixed status list, `all` first.
    pub statuses: Vec<StatusFacet>,
}

/// Sorted, deduplicated union of `tech_stack` across `projects`.
#[must_use]
pub fn tech_facets(projects: &[ProjectEntry]) -> Vec<String> {
    projects
        .iter()
        .flat_map(|p| p.tech_stack.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every tech facet with the number of projects that use it, in facet order.
///
/// A project listing the same tech twice is counted once.
#[must_use]
pub fn tech_counts(projects: &[ProjectEntry]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for project in projects {
        let distinct: BTreeSet<&str> = project.tech_stack.iter().map(String::as_str).collect();
        for tech in distinct {
            *counts.entry(tech).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(tech, n)| (tech.to_string(), n))
        .collect()
}

/// Derive the tech facets from `projects` and pair them with the fixed status list.
#[must_use]
pub fn get_facets(projects: &[ProjectEntry], statuses: &[StatusFacet]) -> Facets {
    let techs = tech_facets(projects);
    tracing::debug!(
        projects = projects.len(),
        techs = techs.len(),
        "extracted tech facets"
    );
    Facets {
        techs,
        statuses: statuses.to_vec(),
    }
}
