//! Keyword relevance ranking and tag filtering for catalog search.

use std::collections::HashSet;

use crate::{
    models::CatalogItem,
    services::tags::strip_marker,
};

/// Separator between requested tag names
pub const TAG_DELIMITER: char = ',';

/// How well an item matches a search keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    NoMatch = 0,
    OtherField = 1,
    NameContains = 2,
    NameExact = 3,
}

/// Tier of `item` for an already lowercased keyword
fn tier_of(item: &CatalogItem, keyword: &str) -> Tier {
    let name = item.name.to_lowercase();

    if name == keyword {
        Tier::NameExact
    } else if name.contains(keyword) {
        Tier::NameContains
    } else if item.description.to_lowercase().contains(keyword)
        || item.target_area.to_lowercase().contains(keyword)
    {
        Tier::OtherField
    } else {
        Tier::NoMatch
    }
}

/// Orders the snapshot for a search.
///
/// With a non-blank keyword, items matching none of name, description or target
/// area are dropped and the rest sorted by tier, best first, then by id. Without
/// one, the snapshot is returned in id order.
pub fn rank(items: Vec<CatalogItem>, keyword: Option<&str>) -> Vec<CatalogItem> {
    let keyword = keyword.map(str::trim).filter(|k| !k.is_empty());

    let Some(keyword) = keyword else {
        let mut items = items;
        items.sort_by_key(|item| item.id);
        return items;
    };

    let keyword = keyword.to_lowercase();
    let mut tiered: Vec<(Tier, CatalogItem)> = items
        .into_iter()
        .map(|item| (tier_of(&item, &keyword), item))
        .filter(|(tier, _)| *tier != Tier::NoMatch)
        .collect();

    tiered.sort_by(|(a_tier, a), (b_tier, b)| b_tier.cmp(a_tier).then_with(|| a.id.cmp(&b.id)));
    tiered.into_iter().map(|(_, item)| item).collect()
}

/// Splits a delimiter-separated tag string into trimmed, non-empty terms
pub fn parse_tag_terms(raw: &str) -> Vec<String> {
    raw.split(TAG_DELIMITER)
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keeps items that have, for every term, some tag containing that term.
///
/// Each term narrows the previous result, order is preserved and an item is
/// kept at most once.
pub fn filter_by_tags(items: Vec<CatalogItem>, terms: &[String]) -> Vec<CatalogItem> {
    let mut survivors = items;

    for term in terms {
        let term = strip_marker(term);
        survivors.retain(|item| item.tag_set().any_contains(term));
    }

    let mut seen = HashSet::new();
    survivors.retain(|item| seen.insert(item.id));
    survivors
}

/// Ranks then filters a catalog snapshot for a search request
pub fn search_catalog(
    snapshot: Vec<CatalogItem>,
    keyword: Option<&str>,
    tags: Option<&str>,
) -> Vec<CatalogItem> {
    let ranked = rank(snapshot, keyword);

    let terms = tags.map(parse_tag_terms).unwrap_or_default();
    if terms.is_empty() {
        return ranked;
    }

    filter_by_tags(ranked, &terms)
}
