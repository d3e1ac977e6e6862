use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use crate::services::tags::TagSet;

/// Identifier of a catalog item. Ascending ids follow creation order.
pub type ItemId = i64;

/// Exercise category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Stretch,
    Strength,
    Cardio,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Stretch => "stretch",
            Category::Strength => "strength",
            Category::Cardio => "cardio",
            Category::Other => "other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stretch" => Ok(Category::Stretch),
            "strength" => Ok(Category::Strength),
            "cardio" => Ok(Category::Cardio),
            "other" => Ok(Category::Other),
            unknown => Err(format!("unknown category '{}'", unknown)),
        }
    }
}

/// A single exercise entry together with the names of its tags
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub beginner_guide: String,
    #[serde(default)]
    pub category: Category,
    /// Target body area, e.g. "shoulders" or "whole body"
    #[serde(default)]
    pub target_area: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl CatalogItem {
    pub fn new(id: ItemId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            beginner_guide: String::new(),
            category: Category::default(),
            target_area: String::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_target_area(mut self, target_area: impl Into<String>) -> Self {
        self.target_area = target_area.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Normalized view of the item's tags used for matching
    pub fn tag_set(&self) -> TagSet {
        TagSet::from_names(&self.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in [
            Category::Stretch,
            Category::Strength,
            Category::Cardio,
            Category::Other,
        ] {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("yoga".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::Cardio).unwrap();
        assert_eq!(json, "\"cardio\"");
    }

    #[test]
    fn test_item_deserializes_with_defaults() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"id": 7, "name": "Neck roll", "description": "Slow circles"}"#)
                .unwrap();
        assert_eq!(item.category, Category::Stretch);
        assert!(item.tags.is_empty());
        assert_eq!(item.beginner_guide, "");
    }

    #[test]
    fn test_tag_set_includes_unmarked_spelling() {
        let item = CatalogItem::new(1, "Shoulder stretch", "").with_tags(["#shoulder-relief"]);
        assert!(item.tag_set().contains("shoulder-relief"));
        assert!(item.tag_set().contains("#shoulder-relief"));
    }
}
