//! Derived read-only views over the loaded node set: action ranking,
//! cost-effectiveness augmentation, stacked-bar decomposition.
pub mod decompose;
pub mod efficiency;

pub use decompose::{decompose, BarSegment, Decomposition};
pub use efficiency::{
    augment_actions, distinct_groups, filter_by_group, mac_actions, sort_actions, ActionView,
    SortActionsBy,
};
