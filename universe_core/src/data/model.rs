// Host-owned catalogue records and filter state.
// The core only reads these; layout and animation derive everything else.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

pub const MIN_SCORE: f32 = 1.0;
pub const MAX_SCORE: f32 = 10.0;

/// A single catalogue entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: u64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default = "default_score")]
    pub score: f32,
    /// Hex color hint, e.g. `"#4fd1c5"`.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub url: Option<Url>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_score() -> f32 {
    MIN_SCORE
}

impl Resource {
    pub fn new(id: u64, name: impl Into<String>, category: impl Into<String>, score: f32) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            sub_category: None,
            score,
            color: None,
            url: None,
            description: None,
        }
    }

    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// String key used by the layout tables and the seeded generator.
    pub fn key(&self) -> String {
        self.id.to_string()
    }

    /// Score clamped to the conventional range. NaN counts as the minimum.
    pub fn clamped_score(&self) -> f32 {
        clamp_score(self.score)
    }
}

pub fn clamp_score(score: f32) -> f32 {
    if score.is_nan() {
        return MIN_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Filter state written by the host UI (search box, category picker).
#[derive(bevy::prelude::Resource, Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    pub active_category: Option<String>,
    pub active_sub_category: Option<String>,
    pub matched_resource_ids: Option<HashSet<u64>>,
    pub matched_categories: Option<HashSet<String>>,
}

impl FilterState {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            active_category: Some(category.into()),
            ..Default::default()
        }
    }

    pub fn matched_ids(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            matched_resource_ids: Some(ids.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active_category.is_none()
            && self.active_sub_category.is_none()
            && self.matched_resource_ids.is_none()
            && self.matched_categories.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// One-line description for the HUD.
    pub fn summary(&self) -> String {
        if let Some(ids) = &self.matched_resource_ids {
            return format!("{} search matches", ids.len());
        }
        match (&self.active_category, &self.active_sub_category) {
            (Some(cat), Some(sub)) => return format!("{cat} / {sub}"),
            (Some(cat), None) => return cat.clone(),
            (None, Some(sub)) => return format!("* / {sub}"),
            (None, None) => {}
        }
        if let Some(cats) = &self.matched_categories {
            return format!("{} categories", cats.len());
        }
        "none".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_deserializes_with_camel_case_fields() {
        let json = r##"{
            "id": 7,
            "name": "ripgrep",
            "category": "CLI",
            "subCategory": "Search",
            "score": 9.5,
            "color": "#ff8800",
            "url": "https://github.com/BurntSushi/ripgrep"
        }"##;
        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.id, 7);
        assert_eq!(resource.sub_category.as_deref(), Some("Search"));
        assert_eq!(resource.url.unwrap().host_str(), Some("github.com"));
        assert!(resource.description.is_none());
    }

    #[test]
    fn missing_score_defaults_to_minimum() {
        let json = r#"{ "id": 1, "name": "a", "category": "b" }"#;
        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.clamped_score(), MIN_SCORE);
    }

    #[test]
    fn scores_are_clamped_silently() {
        assert_eq!(clamp_score(-3.0), 1.0);
        assert_eq!(clamp_score(42.0), 10.0);
        assert_eq!(clamp_score(f32::NAN), 1.0);
        assert_eq!(clamp_score(5.5), 5.5);
    }

    #[test]
    fn filter_summary_prefers_search_matches() {
        let mut filter = FilterState::matched_ids([1, 2, 3]);
        filter.active_category = Some("CLI".into());
        assert_eq!(filter.summary(), "3 search matches");
        filter.clear();
        assert!(filter.is_empty());
        assert_eq!(filter.summary(), "none");
    }
}
