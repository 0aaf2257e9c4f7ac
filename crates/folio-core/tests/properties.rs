use folio_core::expand::{EntryKind, ExpandRegistry};
use folio_core::facets::tech_facets;
use folio_core::filter::{FilterState, apply, evaluate, filter_projects};
use folio_core::timeline::merge_timeline;
use proptest::prelude::*;

use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(2000))]

    // Filter evaluator

    #[test]
    fn filtered_is_ordered_subsequence(projects in arb_projects(), state in arb_filter_state()) {
        let out = filter_projects(&projects, &state);
        let mut cursor = projects.iter();
        for item in &out {
            prop_assert!(cursor.any(|p| std::ptr::eq(p, *item)), "not an ordered subsequence");
        }
    }

    #[test]
    fn filtered_is_exactly_evaluate(projects in arb_projects(), state in arb_filter_state()) {
        let out = filter_projects(&projects, &state);
        let expected = projects.iter().filter(|p| evaluate(p, &state)).count();
        prop_assert_eq!(out.len(), expected);
        prop_assert!(out.iter().all(|p| evaluate(p, &state)));
    }

    #[test]
    fn toggle_tech_is_involution(state in arb_filter_state(), tech in arb_tech()) {
        prop_assert_eq!(state.toggle_tech(&tech).toggle_tech(&tech), state);
    }

    #[test]
    fn adding_a_tech_never_grows_matches(
        projects in arb_projects(),
        state in arb_filter_state(),
        tech in arb_tech()
    ) {
        prop_assume!(!state.is_tech_selected(&tech));
        let before = filter_projects(&projects, &state).len();
        let narrowed = state.toggle_tech(&tech);
        let after = filter_projects(&projects, &narrowed).len();
        prop_assert!(after <= before);
    }

    #[test]
    fn reset_matches_everything(projects in arb_projects()) {
        let state = FilterState::reset();
        let out = apply(&projects, &state);
        prop_assert_eq!(out.filtered_count(), projects.len());
        prop_assert!(state.selected_status().is_all());
    }

    #[test]
    fn set_status_keeps_tech_selection(state in arb_filter_state(), status in arb_status()) {
        let next = state.set_status(&status);
        prop_assert_eq!(next.selected_techs(), state.selected_techs());
        prop_assert!(next.is_status_selected(&status));
    }

    // Facets

    #[test]
    fn tech_facets_are_sorted_unique_union(projects in arb_projects()) {
        let techs = tech_facets(&projects);
        prop_assert!(techs.windows(2).all(|w| w[0] < w[1]));
        for project in &projects {
            for tech in &project.tech_stack {
                prop_assert!(techs.binary_search(tech).is_ok());
            }
        }
        for tech in &techs {
            prop_assert!(projects.iter().any(|p| p.uses(tech)));
        }
    }

    // Timeline

    #[test]
    fn merge_preserves_every_item_and_kind(
        experiences in arb_experiences(),
        certifications in arb_certifications()
    ) {
        let merged = merge_timeline(&experiences, &certifications);
        prop_assert_eq!(merged.len(), experiences.len() + certifications.len());
        let exp_count = merged.iter().filter(|i| i.kind() == EntryKind::Experience).count();
        prop_assert_eq!(exp_count, experiences.len());
    }

    #[test]
    fn merge_is_descending_and_stable(
        experiences in arb_experiences(),
        certifications in arb_certifications()
    ) {
        let merged = merge_timeline(&experiences, &certifications);
        prop_assert!(merged.windows(2).all(|w| w[0].id() >= w[1].id()));

        // Among equal ids: experiences before certifications, each in input order.
        let concat: Vec<(EntryKind, String)> = experiences
            .iter()
            .map(|e| (EntryKind::Experience, e.position.clone()))
            .chain(certifications.iter().map(|c| (EntryKind::Certification, c.title.clone())))
            .collect();
        let rank = |kind: EntryKind, name: &str| {
            concat.iter().position(|(k, n)| *k == kind && n == name).unwrap_or(usize::MAX)
        };
        for w in merged.windows(2) {
            if w[0].id() == w[1].id() {
                let name = |i: &folio_core::TimelineItem<'_>| match i {
                    folio_core::TimelineItem::Experience(e) => e.position.clone(),
                    folio_core::TimelineItem::Certification(c) => c.title.clone(),
                };
                prop_assert!(rank(w[0].kind(), &name(&w[0])) < rank(w[1].kind(), &name(&w[1])));
            }
        }
    }

    // Expand registry

    #[test]
    fn toggle_expand_touches_one_key(
        toggles in prop::collection::vec((any::<bool>(), 0u32..6), 0..20),
        kind_is_exp in any::<bool>(),
        id in 0u32..6
    ) {
        let to_kind = |is_exp: bool| if is_exp { EntryKind::Experience } else { EntryKind::Certification };
        let reg = toggles
            .iter()
            .fold(ExpandRegistry::new(), |r, (k, i)| r.toggle_expand(to_kind(*k), *i));
        let kind = to_kind(kind_is_exp);
        let next = reg.toggle_expand(kind, id);

        prop_assert_ne!(next.is_expanded(kind, id), reg.is_expanded(kind, id));
        for other_kind in [EntryKind::Experience, EntryKind::Certification] {
            for other_id in 0u32..6 {
                if (other_kind, other_id) != (kind, id) {
                    prop_assert_eq!(
                        next.is_expanded(other_kind, other_id),
                        reg.is_expanded(other_kind, other_id)
                    );
                }
            }
        }
        prop_assert_eq!(next.toggle_expand(kind, id).is_expanded(kind, id), reg.is_expanded(kind, id));
    }
}
