use std::collections::BTreeMap;

use crate::deck::MapStep;

/// Marking applied to one map region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionState {
    Default,
    Visited,
    Active,
}

/// Region markings for a map slide at the given sub-step.
///
/// Steps before the selected one are visited, the selected one is active and
/// the rest keep the default look. With no selection every region is default.
/// When several steps name the same region, the last non-default marking in
/// step order wins. The result is rebuilt from nothing on each call.
pub fn compute_region_states(
    steps: &[MapStep],
    sub_step: Option<usize>,
) -> BTreeMap<String, RegionState> {
    let mut states = BTreeMap::new();
    for (i, step) in steps.iter().enumerate() {
        if step.region_id.is_empty() {
            continue;
        }
        let state = match sub_step {
            Some(selected) if i == selected => RegionState::Active,
            Some(selected) if i < selected => RegionState::Visited,
            _ => RegionState::Default,
        };
        if state == RegionState::Default {
            states
                .entry(step.region_id.clone())
                .or_insert(RegionState::Default);
        } else {
            states.insert(step.region_id.clone(), state);
        }
    }
    states
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(ids: &[&str]) -> Vec<MapStep> {
        ids.iter()
            .map(|id| MapStep {
                region_id: id.to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn state(states: &BTreeMap<String, RegionState>, id: &str) -> RegionState {
        states[id]
    }

    #[test]
    fn overview_marks_everything_default() {
        let s = steps(&["IN-UP", "IN-MH", "IN-WB"]);
        let states = compute_region_states(&s, None);
        assert_eq!(states.len(), 3);
        assert!(states.values().all(|v| *v == RegionState::Default));
    }

    #[test]
    fn visited_active_default_split() {
        let s = steps(&["IN-UP", "IN-MH", "IN-WB"]);
        let states = compute_region_states(&s, Some(1));
        assert_eq!(state(&states, "IN-UP"), RegionState::Visited);
        assert_eq!(state(&states, "IN-MH"), RegionState::Active);
        assert_eq!(state(&states, "IN-WB"), RegionState::Default);
    }

    #[test]
    fn last_step_leaves_nothing_default() {
        let s = steps(&["IN-UP", "IN-MH", "IN-WB"]);
        let states = compute_region_states(&s, Some(2));
        assert_eq!(state(&states, "IN-WB"), RegionState::Active);
        assert!(!states.values().any(|v| *v == RegionState::Default));
    }

    #[test]
    fn repeated_call_gives_same_assignment() {
        let s = steps(&["IN-AS", "IN-BR", "IN-ML"]);
        for sub_step in [None, Some(0), Some(1), Some(2)] {
            let once = compute_region_states(&s, sub_step);
            let twice = compute_region_states(&s, sub_step);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn switching_slides_drops_previous_regions() {
        let first = compute_region_states(&steps(&["IN-UP", "IN-MH"]), Some(1));
        let second = compute_region_states(&steps(&["IN-MN", "IN-ML"]), None);
        assert!(first.contains_key("IN-UP"));
        assert!(!second.contains_key("IN-UP"));
        assert!(!second.contains_key("IN-MH"));
    }

    #[test]
    fn duplicate_region_keeps_last_marking() {
        // Visited by step 0, then step 2 is the active one.
        let s = steps(&["IN-ML", "IN-AS", "IN-ML"]);
        let states = compute_region_states(&s, Some(2));
        assert_eq!(state(&states, "IN-ML"), RegionState::Active);

        // A later default step does not clear an earlier marking.
        let states = compute_region_states(&s, Some(0));
        assert_eq!(state(&states, "IN-ML"), RegionState::Active);
        assert_eq!(state(&states, "IN-AS"), RegionState::Default);
    }

    #[test]
    fn out_of_range_selection_marks_all_visited() {
        let s = steps(&["IN-UP", "IN-MH"]);
        let states = compute_region_states(&s, Some(9));
        assert!(states.values().all(|v| *v == RegionState::Visited));
    }

    #[test]
    fn blank_region_ids_are_skipped() {
        let s = steps(&["", "IN-UP"]);
        let states = compute_region_states(&s, Some(0));
        assert_eq!(states.len(), 1);
        assert_eq!(state(&states, "IN-UP"), RegionState::Default);
    }
}
