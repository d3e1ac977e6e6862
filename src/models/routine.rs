use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CatalogItem, ItemId, UserId};

/// Link between a user and an exercise kept in their personal routine.
/// Unique per (user, item) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutineMembership {
    pub id: i64,
    pub user_id: UserId,
    pub item_id: ItemId,
    pub added_at: DateTime<Utc>,
    pub view_count: i32,
}

/// A membership with its catalog item resolved for listing
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoutineEntry {
    #[serde(flatten)]
    pub membership: RoutineMembership,
    pub exercise: CatalogItem,
}

/// Listing order: most viewed first, then most recently added
pub fn listing_order(a: &RoutineMembership, b: &RoutineMembership) -> std::cmp::Ordering {
    b.view_count
        .cmp(&a.view_count)
        .then_with(|| b.added_at.cmp(&a.added_at))
        .then_with(|| b.id.cmp(&a.id))
}
