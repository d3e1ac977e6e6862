use serde::Serialize;

use crate::{
    models::{CatalogItem, Level},
    services::{
        rules::{
            concern_regions, FatigueTier, MoodTier, TagGroup, ACCESSIBILITY_BOOST, BASE_SCORE,
            CONCERN_BOOST, FATIGUE_RULES, MOOD_RULES,
        },
        tags::TagSet,
    },
};

/// Per-factor contributions to an item's score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub base: i32,
    pub concern: i32,
    pub fatigue: i32,
    pub mood: i32,
    pub accessibility: i32,
}

impl ScoreBreakdown {
    /// Sum of all contributions, floored at zero
    pub fn total(&self) -> u32 {
        let sum = self.base + self.concern + self.fatigue + self.mood + self.accessibility;
        sum.max(0) as u32
    }
}

/// Affinity of one catalog item for the given user state
pub fn score(item: &CatalogItem, fatigue: Level, mood: Level, concern: &str) -> u32 {
    breakdown(item, fatigue, mood, concern).total()
}

pub fn breakdown(item: &CatalogItem, fatigue: Level, mood: Level, concern: &str) -> ScoreBreakdown {
    let tags = item.tag_set();

    let concern_boost = concern_regions(concern)
        .filter(|region| tags.contains_any(region.wanted_tags()))
        .count() as i32
        * CONCERN_BOOST;

    let fatigue_tier = FatigueTier::of(fatigue);
    let fatigue_boost = tier_delta(&tags, FATIGUE_RULES, fatigue_tier);

    let mood_tier = MoodTier::of(mood);
    let mood_boost = tier_delta(&tags, MOOD_RULES, mood_tier);

    let accessibility = if tags.contains_any(TagGroup::Accessible.tags()) {
        ACCESSIBILITY_BOOST
    } else {
        0
    };

    ScoreBreakdown {
        base: BASE_SCORE,
        concern: concern_boost,
        fatigue: fatigue_boost,
        mood: mood_boost,
        accessibility,
    }
}

fn tier_delta<T: PartialEq + Copy>(tags: &TagSet, rules: &[(T, TagGroup, i32)], tier: T) -> i32 {
    rules
        .iter()
        .filter(|(rule_tier, group, _)| *rule_tier == tier && tags.contains_any(group.tags()))
        .map(|(_, _, delta)| delta)
        .sum()
}
