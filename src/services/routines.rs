use serde::Serialize;

use crate::{
    db::RoutineStore,
    error::{AppError, AppResult},
    models::{CatalogItem, ItemId, RoutineEntry, RoutineMembership, UserId},
    services::{
        catalog::CatalogService,
        pagination::{paginate, Page, HARD_CAP},
    },
};

/// Result of adding an exercise to a routine
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AddOutcome {
    pub created: bool,
    pub membership: RoutineMembership,
    pub exercise: CatalogItem,
}

/// Adds the item to the user's routine; re-adding returns the existing record.
pub async fn add(
    catalog: &CatalogService,
    routines: &dyn RoutineStore,
    user_id: UserId,
    item_id: ItemId,
) -> AppResult<AddOutcome> {
    let exercise = catalog.get_item(item_id).await?;
    let (membership, created) = routines.insert_if_absent(user_id, item_id).await?;

    tracing::info!(
        user_id = %user_id,
        item_id,
        created,
        "Routine add"
    );

    Ok(AddOutcome {
        created,
        membership,
        exercise,
    })
}

/// Removes the item from the user's routine. Removing an absent pair is an error.
pub async fn remove(
    catalog: &CatalogService,
    routines: &dyn RoutineStore,
    user_id: UserId,
    item_id: ItemId,
) -> AppResult<()> {
    catalog.get_item(item_id).await?;

    let removed = routines.remove(user_id, item_id).await?;
    if removed == 0 {
        return Err(AppError::NotFound(format!(
            "Exercise {} is not in your routine",
            item_id
        )));
    }

    tracing::info!(user_id = %user_id, item_id, removed, "Routine remove");
    Ok(())
}

/// The user's routine, most viewed first, with each exercise resolved
pub async fn list(
    catalog: &CatalogService,
    routines: &dyn RoutineStore,
    user_id: UserId,
    page: i64,
) -> AppResult<Page<RoutineEntry>> {
    let memberships = routines.list(user_id, HARD_CAP).await?;

    let mut entries = Vec::with_capacity(memberships.len());
    for membership in memberships {
        match catalog.get_item(membership.item_id).await {
            Ok(exercise) => entries.push(RoutineEntry {
                membership,
                exercise,
            }),
            Err(AppError::NotFound(_)) => tracing::warn!(
                item_id = membership.item_id,
                "Routine references an exercise missing from the catalog"
            ),
            Err(e) => return Err(e),
        }
    }

    Ok(paginate(entries, page)?)
}
