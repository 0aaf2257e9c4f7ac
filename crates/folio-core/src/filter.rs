//! Project filter state and evaluator.
//!
//! [`FilterState`] is a value: every transition returns a new state and leaves
//! the receiver untouched, so callers detect changes with `==`.
//!
//! Matching rules:
//! - status: the `all` sentinel matches every project, any other value must
//!   equal `ProjectEntry::status` exactly
//! - techs: every selected tech must be in the project's stack (AND); an
//!   empty selection matches everything
//!
//! No transition is rejected. An unknown status or a tech no project uses is
//! a legal selection that simply matches nothing.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ProjectEntry;

/// Sentinel status value that disables status filtering.
pub const ALL_STATUS: &str = "all";

/// The status dimension of a [`FilterState`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusSelection {
    #[default]
    All,
    Only(String),
}

impl StatusSelection {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_STATUS,
            Self::Only(s) => s,
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns true if a project with `status` passes this selection.
    #[must_use]
    pub fn admits(&self, status: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl From<&str> for StatusSelection {
    fn from(value: &str) -> Self {
        if value == ALL_STATUS {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }
}

impl From<String> for StatusSelection {
    fn from(value: String) -> Self {
        if value == ALL_STATUS {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<StatusSelection> for String {
    fn from(value: StatusSelection) -> Self {
        match value {
            StatusSelection::All => ALL_STATUS.to_string(),
            StatusSelection::Only(s) => s,
        }
    }
}

impl fmt::Display for StatusSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current selection over the project facets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    selected_techs: BTreeSet<String>,
    selected_status: StatusSelection,
}

impl FilterState {
    /// The canonical empty state: no techs, status `all`.
    #[must_use]
    pub fn reset() -> Self {
        Self::default()
    }

    /// Add `tag` if absent, remove it if present.
    #[must_use]
    pub fn toggle_tech(&self, tag: &str) -> Self {
        let mut next = self.clone();
        if !next.selected_techs.remove(tag) {
            next.selected_techs.insert(tag.to_string());
        }
        next
    }

    /// Replace the status selection. `"all"` selects the sentinel.
    #[must_use]
    pub fn set_status(&self, status: &str) -> Self {
        Self {
            selected_techs: self.selected_techs.clone(),
            selected_status: StatusSelection::from(status),
        }
    }

    #[must_use]
    pub const fn selected_techs(&self) -> &BTreeSet<String> {
        &self.selected_techs
    }

    #[must_use]
    pub const fn selected_status(&self) -> &StatusSelection {
        &self.selected_status
    }

    #[must_use]
    pub fn is_tech_selected(&self, tag: &str) -> bool {
        self.selected_techs.contains(tag)
    }

    #[must_use]
    pub fn is_status_selected(&self, status: &str) -> bool {
        self.selected_status.as_str() == status
    }

    /// Returns true if any tech is selected or the status is not `all`.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.selected_techs.is_empty() || !self.selected_status.is_all()
    }

    /// Returns true if `project` satisfies this selection.
    #[must_use]
    pub fn matches(&self, project: &ProjectEntry) -> bool {
        evaluate(project, self)
    }
}

/// Decide whether `project` passes `state`.
#[must_use]
pub fn evaluate(project: &ProjectEntry, state: &FilterState) -> bool {
    state.selected_status.admits(&project.status)
        && state.selected_techs.iter().all(|tech| project.uses(tech))
}

/// Projects passing `state`, in their original order.
#[must_use]
pub fn filter_projects<'a>(projects: &'a [ProjectEntry], state: &FilterState) -> Vec<&'a ProjectEntry> {
    projects.iter().filter(|p| evaluate(p, state)).collect()
}

/// The filtered list together with the size of the unfiltered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredProjects<'a> {
    pub items: Vec<&'a ProjectEntry>,
    pub total: usize,
}

impl FilteredProjects<'_> {
    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.items.len()
    }
}

/// Run [`filter_projects`] and keep the total for "N / M" headers.
#[must_use]
pub fn apply<'a>(projects: &'a [ProjectEntry], state: &FilterState) -> FilteredProjects<'a> {
    let items = filter_projects(projects, state);
    tracing::debug!(
        total = projects.len(),
        filtered = items.len(),
        status = %state.selected_status,
        techs = state.selected_techs.len(),
        "filtered projects"
    );
    FilteredProjects {
        items,
        total: projects.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectLinks;

    fn project(id: u32, status: &str, techs: &[&str]) -> ProjectEntry {
        ProjectEntry {
            id,
            title: format!("p{id}"),
            description: String::new(),
            tech_stack: techs.iter().map(|t| (*t).to_string()).collect(),
            status: status.into(),
            links: ProjectLinks::default(),
            image_url: None,
            highlights: vec![],
        }
    }

    fn ids(items: &[&ProjectEntry]) -> Vec<u32> {
        items.iter().map(|p| p.id).collect()
    }

    fn sample() -> Vec<ProjectEntry> {
        vec![
            project(1, "Déployé", &["React", "Node"]),
            project(2, "Open source", &["Python"]),
        ]
    }

    #[test]
    fn empty_state_matches_all() {
        let state = FilterState::default();
        let projects = sample();
        assert_eq!(ids(&filter_projects(&projects, &state)), vec![1, 2]);
        assert!(!state.has_active_filters());
    }

    #[test]
    fn status_filter_selects_exact_status() {
        let projects = sample();
        let state = FilterState::reset().set_status("Open source");
        let out = apply(&projects, &state);
        assert_eq!(ids(&out.items), vec![2]);
        assert_eq!(out.filtered_count(), 1);
        assert_eq!(out.total, 2);
    }

    #[test]
    fn single_tech_with_all_status() {
        let projects = sample();
        let state = FilterState::reset().toggle_tech("React");
        assert!(state.selected_status().is_all());
        assert_eq!(ids(&filter_projects(&projects, &state)), vec![1]);
    }

    #[test]
    fn techs_combine_with_and() {
        let projects = sample();
        let state = FilterState::reset().toggle_tech("React").toggle_tech("Python");
        assert!(filter_projects(&projects, &state).is_empty());
    }

    #[test]
    fn unknown_status_yields_no_matches() {
        let projects = sample();
        let state = FilterState::reset().set_status("Abandonné");
        assert!(filter_projects(&projects, &state).is_empty());
        assert!(state.has_active_filters());
        assert!(state.is_status_selected("Abandonné"));
    }

    #[test]
    fn setting_all_restores_sentinel() {
        let state = FilterState::reset().set_status("Déployé").set_status("all");
        assert_eq!(*state.selected_status(), StatusSelection::All);
        assert!(!state.has_active_filters());
    }

    #[test]
    fn toggle_twice_is_identity() {
        let start = FilterState::reset().toggle_tech("Node").set_status("Déployé");
        let again = start.toggle_tech("React").toggle_tech("React");
        assert_eq!(again, start);
    }

    #[test]
    fn transitions_leave_receiver_untouched() {
        let start = FilterState::reset();
        let next = start.toggle_tech("React");
        assert!(start.selected_techs().is_empty());
        assert!(next.is_tech_selected("React"));
        assert_ne!(start, next);
    }

    #[test]
    fn reset_clears_everything() {
        let dirty = FilterState::reset()
            .toggle_tech("React")
            .set_status("Open source");
        assert_ne!(dirty, FilterState::reset());
        let projects = sample();
        let out = apply(&projects, &FilterState::reset());
        assert_eq!(out.filtered_count(), out.total);
    }

    #[test]
    fn selection_order_does_not_matter() {
        let a = FilterState::reset().toggle_tech("React").toggle_tech("Node");
        let b = FilterState::reset().toggle_tech("Node").toggle_tech("React");
        assert_eq!(a, b);
    }

    #[test]
    fn state_serializes_with_sentinel_string() {
        let state = FilterState::reset().toggle_tech("React");
        let json = serde_json::to_value(&state).expect("serialize state");
        assert_eq!(json["selectedStatus"], "all");
        assert_eq!(json["selectedTechs"][0], "React");

        let back: FilterState = serde_json::from_value(json).expect("deserialize state");
        assert_eq!(back, state);
    }
}
