//! efficiency.rs
//! Cost-effectiveness augmentation, sorting and filtering of the action
//! list. One `ActionView` per action, computed against the active year
//! range and (when present) the selected efficiency pairing.

use rayon::prelude::*;

use crate::computation::aggregate;
use crate::model::{ActionEfficiencyPair, ActionGroup, Node};

/// Derived per-action figures for the list, comparison and MAC views.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionView {
    pub action_id: String,
    pub name: String,
    pub group_id: Option<String>,
    pub is_enabled: bool,
    /// Impact-metric value at the end of the active range, missing as `0`.
    pub impact_on_target_year: f64,
    /// Forecast impact in the range's end year alone (the yearly figure
    /// next to the cumulative one).
    pub yearly_effect: f64,
    /// Sign-adjusted sums over the active range. Only present when the
    /// selected pairing knows this action.
    pub cumulative_impact: Option<f64>,
    pub cumulative_cost: Option<f64>,
    /// `cost / |impact| / divisor`; may be non-finite when the impact is
    /// zero, which downstream treats as unratable.
    pub cumulative_efficiency: Option<f64>,
    pub efficiency_divisor: Option<f64>,
}

fn augment_action(action: &Node, pair: Option<&ActionEfficiencyPair>, range: (i32, i32)) -> ActionView {
    let (start, end) = range;
    let mut view = ActionView {
        action_id: action.id.clone(),
        name: action.name.clone(),
        group_id: action.group.as_ref().map(|g| g.id.clone()),
        is_enabled: action.is_enabled(),
        impact_on_target_year: aggregate::impact_value(action, end),
        yearly_effect: action
            .impact_metric
            .as_ref()
            .and_then(|m| aggregate::forecast_value(m, end))
            .unwrap_or(0.0),
        cumulative_impact: None,
        cumulative_cost: None,
        cumulative_efficiency: None,
        efficiency_divisor: None,
    };

    let Some(pair) = pair else { return view };
    let Some(entry) = pair.entry_for(&action.id) else { return view };

    let impact_sign = if pair.invert_impact { -1.0 } else { 1.0 };
    let cost_sign = if pair.invert_cost { -1.0 } else { 1.0 };
    let impact = impact_sign * aggregate::sum_values_between(&entry.impact_values, start, end);
    let cost = cost_sign * aggregate::sum_values_between(&entry.cost_values, start, end);

    view.cumulative_impact = Some(impact);
    view.cumulative_cost = Some(cost);
    view.efficiency_divisor = entry.efficiency_divisor;
    view.cumulative_efficiency = entry
        .efficiency_divisor
        .map(|divisor| aggregate::efficiency_ratio(cost, impact, divisor));
    view
}

/// Augments every action against the active range and pairing. Actions are
/// independent, so the list fans out across threads.
pub fn augment_actions(
    actions: &[Node],
    pair: Option<&ActionEfficiencyPair>,
    range: (i32, i32),
) -> Vec<ActionView> {
    actions.par_iter().map(|action| augment_action(action, pair, range)).collect()
}

/// The selectable orderings of the action list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortActionsBy {
    /// Keep the order the API delivered.
    Standard,
    ImpactOnTargetYear,
    CumulativeImpact,
    CumulativeCost,
    CumulativeEfficiency,
}

fn sort_key(view: &ActionView, by: SortActionsBy) -> Option<f64> {
    match by {
        SortActionsBy::Standard => None,
        SortActionsBy::ImpactOnTargetYear => Some(view.impact_on_target_year),
        SortActionsBy::CumulativeImpact => view.cumulative_impact,
        SortActionsBy::CumulativeCost => view.cumulative_cost,
        // Unratable actions (no divisor, or a zero-impact inf) sort with
        // the unkeyed rather than dominating one end of the scale.
        SortActionsBy::CumulativeEfficiency => {
            view.cumulative_efficiency.filter(|e| e.is_finite())
        }
    }
}

/// Stable sort, so `Standard` order is the tiebreak. Entries without the
/// requested figure go last in either direction.
pub fn sort_actions(views: &mut [ActionView], by: SortActionsBy, ascending: bool) {
    if by == SortActionsBy::Standard {
        return;
    }
    views.sort_by(|a, b| match (sort_key(a, by), sort_key(b, by)) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        }
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Keeps only the actions in the given group; `None` keeps everything.
pub fn filter_by_group(views: &mut Vec<ActionView>, group_id: Option<&str>) {
    if let Some(group_id) = group_id {
        views.retain(|v| v.group_id.as_deref() == Some(group_id));
    }
}

/// The groups present in an action list, first appearance order, ungrouped
/// actions skipped. Feeds the group filter dropdown.
pub fn distinct_groups(actions: &[Node]) -> Vec<&ActionGroup> {
    let mut seen: Vec<&ActionGroup> = Vec::new();
    for action in actions {
        if let Some(group) = &action.group {
            if !seen.iter().any(|g| g.id == group.id) {
                seen.push(group);
            }
        }
    }
    seen
}

/// The subset of views plottable on the MAC curve: rated, finite, and
/// inside the pairing's plot limit when one is set.
pub fn mac_actions<'a>(views: &'a [ActionView], pair: &ActionEfficiencyPair) -> Vec<&'a ActionView> {
    views
        .iter()
        .filter(|v| match v.cumulative_efficiency {
            Some(eff) if eff.is_finite() => {
                pair.plot_limit_efficiency.map_or(true, |cap| eff.abs() <= cap)
            }
            _ => false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActionEfficiency, NodeRef, YearValue};

    fn action(id: &str) -> Node {
        Node { id: id.into(), name: id.into(), is_action: true, ..Default::default() }
    }

    fn grouped(id: &str, group_id: &str) -> Node {
        let mut node = action(id);
        node.group = Some(ActionGroup { id: group_id.into(), ..Default::default() });
        node
    }

    fn pair() -> ActionEfficiencyPair {
        ActionEfficiencyPair {
            invert_impact: false,
            invert_cost: false,
            plot_limit_efficiency: Some(5.0),
            actions: vec![ActionEfficiency {
                action: NodeRef::new("solar"),
                cost_values: vec![YearValue::new(2025, -60.0), YearValue::new(2026, -40.0)],
                impact_values: vec![YearValue::new(2025, 30.0), YearValue::new(2026, 20.0)],
                efficiency_divisor: Some(2.0),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_augment_with_pairing() {
        let actions = vec![action("solar"), action("wind")];
        let views = augment_actions(&actions, Some(&pair()), (2025, 2030));
        let solar = &views[0];
        assert_eq!(solar.cumulative_impact, Some(50.0));
        assert_eq!(solar.cumulative_cost, Some(-100.0));
        // -100 / |50| / 2 = -1
        assert_eq!(solar.cumulative_efficiency, Some(-1.0));
        // Unknown to the pairing: no cumulative figures at all.
        assert_eq!(views[1].cumulative_impact, None);
    }

    #[test]
    fn test_augment_invert_flags_flip_signs() {
        let mut p = pair();
        p.invert_impact = true;
        p.invert_cost = true;
        let views = augment_actions(&[action("solar")], Some(&p), (2025, 2030));
        assert_eq!(views[0].cumulative_impact, Some(-50.0));
        assert_eq!(views[0].cumulative_cost, Some(100.0));
        assert_eq!(views[0].cumulative_efficiency, Some(1.0));
    }

    #[test]
    fn test_augment_respects_year_range() {
        let views = augment_actions(&[action("solar")], Some(&pair()), (2026, 2030));
        assert_eq!(views[0].cumulative_impact, Some(20.0));
        assert_eq!(views[0].cumulative_cost, Some(-40.0));
    }

    fn view(id: &str, eff: Option<f64>) -> ActionView {
        ActionView {
            action_id: id.into(),
            name: id.into(),
            group_id: None,
            is_enabled: true,
            impact_on_target_year: 0.0,
            yearly_effect: 0.0,
            cumulative_impact: None,
            cumulative_cost: None,
            cumulative_efficiency: eff,
            efficiency_divisor: eff.map(|_| 1.0),
        }
    }

    #[test]
    fn test_sort_by_efficiency_unrated_last() {
        let mut views = vec![
            view("a", Some(3.0)),
            view("b", None),
            view("c", Some(-1.0)),
            view("d", Some(f64::INFINITY)),
        ];
        sort_actions(&mut views, SortActionsBy::CumulativeEfficiency, true);
        let ids: Vec<&str> = views.iter().map(|v| v.action_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b", "d"]);

        sort_actions(&mut views, SortActionsBy::CumulativeEfficiency, false);
        let ids: Vec<&str> = views.iter().map(|v| v.action_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_standard_sort_keeps_input_order() {
        let mut views = vec![view("z", Some(9.0)), view("a", Some(1.0))];
        sort_actions(&mut views, SortActionsBy::Standard, true);
        assert_eq!(views[0].action_id, "z");
    }

    #[test]
    fn test_filter_by_group() {
        let actions = vec![grouped("a", "g1"), grouped("b", "g2"), action("c")];
        let mut views = augment_actions(&actions, None, (2020, 2030));
        filter_by_group(&mut views, Some("g1"));
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].action_id, "a");
    }

    #[test]
    fn test_distinct_groups_first_appearance() {
        let actions = vec![grouped("a", "g2"), grouped("b", "g1"), grouped("c", "g2"), action("d")];
        let groups: Vec<&str> = distinct_groups(&actions).iter().map(|g| g.id.as_str()).collect();
        assert_eq!(groups, vec!["g2", "g1"]);
    }

    #[test]
    fn test_mac_actions_excludes_capped_and_unratable() {
        let views = vec![
            view("ok", Some(4.0)),
            view("negative_ok", Some(-4.5)),
            view("over_cap", Some(6.0)),
            view("inf", Some(f64::INFINITY)),
            view("unrated", None),
        ];
        let plotted: Vec<&str> = mac_actions(&views, &pair()).iter().map(|v| v.action_id.as_str()).collect();
        assert_eq!(plotted, vec!["ok", "negative_ok"]);
    }
}
