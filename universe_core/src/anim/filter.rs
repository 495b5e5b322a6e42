//! Filter state → per-resource target opacity.

use crate::data::{FilterState, Resource};

/// Opacity targets. The ordering
/// `hidden <= filtered_out < interaction_threshold < dimmed < visible`
/// is what keeps dimmed items hoverable and filtered-out items inert.
#[derive(Clone, Debug)]
pub struct OpacityLevels {
    pub visible: f32,
    pub dimmed: f32,
    pub interaction_threshold: f32,
    pub filtered_out: f32,
    pub hidden: f32,
}

impl Default for OpacityLevels {
    fn default() -> Self {
        Self {
            visible: 1.0,
            dimmed: 0.25,
            interaction_threshold: 0.2,
            filtered_out: 0.15,
            hidden: 0.1,
        }
    }
}

impl OpacityLevels {
    pub fn is_well_ordered(&self) -> bool {
        self.hidden <= self.filtered_out
            && self.filtered_out < self.interaction_threshold
            && self.interaction_threshold < self.dimmed
            && self.dimmed < self.visible
            && (0.0..=1.0).contains(&self.hidden)
            && (0.0..=1.0).contains(&self.visible)
    }
}

/// First matching rule wins: explicit ids, active category (narrowed by an
/// active subcategory), subcategory alone, matched categories, then
/// everything visible.
pub fn target_opacity(resource: &Resource, filter: &FilterState, levels: &OpacityLevels) -> f32 {
    if let Some(ids) = &filter.matched_resource_ids {
        return pick(ids.contains(&resource.id), levels.visible, levels.filtered_out);
    }

    if let Some(category) = &filter.active_category {
        let in_category = &resource.category == category;
        let in_sub = match &filter.active_sub_category {
            Some(sub) => resource.sub_category.as_ref() == Some(sub),
            None => true,
        };
        return pick(in_category && in_sub, levels.visible, levels.dimmed);
    }

    if let Some(sub) = &filter.active_sub_category {
        let matches = resource.sub_category.as_ref() == Some(sub);
        return pick(matches, levels.visible, levels.hidden);
    }

    if let Some(categories) = &filter.matched_categories {
        return pick(categories.contains(&resource.category), levels.visible, levels.dimmed);
    }

    levels.visible
}

fn pick(matches: bool, hit: f32, miss: f32) -> f32 {
    if matches {
        hit
    } else {
        miss
    }
}
