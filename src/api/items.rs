//! Reporting endpoints and the per-user dashboard.

use super::error::ApiError;
use super::extract::CurrentUser;
use crate::core::state::SharedState;
use crate::matching::{find_matching_items, MatchProbe, MatchedItem};
use crate::model::{Item, ItemKind, ItemStatus, NewItem};
use axum::extract::State;
use axum::Json;
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct ReportResponse {
    pub message: String,
    pub item: Item,
    /// Approved counterparts known at submission time.
    pub matches: Vec<MatchedItem>,
}

#[derive(Serialize, Debug)]
pub struct DashboardItem {
    #[serde(flatten)]
    pub item: Item,
    /// Only computed once the item is approved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<MatchedItem>>,
}

#[derive(Serialize, Debug)]
pub struct DashboardResponse {
    pub username: String,
    pub items: Vec<DashboardItem>,
}

pub async fn report_lost(
    state: State<SharedState>,
    user: CurrentUser,
    Json(new): Json<NewItem>,
) -> Result<Json<ReportResponse>, ApiError> {
    report(state, user, new, ItemKind::Lost).await
}

pub async fn report_found(
    state: State<SharedState>,
    user: CurrentUser,
    Json(new): Json<NewItem>,
) -> Result<Json<ReportResponse>, ApiError> {
    report(state, user, new, ItemKind::Found).await
}

async fn report(
    State(state): State<SharedState>,
    user: CurrentUser,
    new: NewItem,
    kind: ItemKind,
) -> Result<Json<ReportResponse>, ApiError> {
    let new = new.normalized().ok_or_else(|| {
        ApiError::Invalid("Item name, color and location are required".to_string())
    })?;

    let store = state.store.lock().await;
    let existing = store.load_items()?;
    // Matches are computed against the dataset as it was before this
    // report lands, so the new record never matches itself.
    let probe = MatchProbe::for_submission(&new, kind);
    let matches = find_matching_items(&probe, &existing);
    let item = store.append_item(new, kind, &user.username)?;

    let label = match kind {
        ItemKind::Lost => "Lost",
        ItemKind::Found => "Found",
    };
    let message = if matches.is_empty() {
        format!("{} item reported! Waiting for admin approval.", label)
    } else {
        format!(
            "{} item reported! Found {} potential matches. Check your dashboard!",
            label,
            matches.len()
        )
    };

    Ok(Json(ReportResponse {
        message,
        item,
        matches,
    }))
}

/// The caller's own reports, with match suggestions on the approved ones.
pub async fn dashboard(
    State(state): State<SharedState>,
    user: CurrentUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    let items = state.store.lock().await.load_items()?;
    let own = items
        .iter()
        .filter(|i| i.reported_by == user.username)
        .map(|item| {
            let matches = (item.status == ItemStatus::Approved)
                .then(|| find_matching_items(&MatchProbe::from(item), &items));
            DashboardItem {
                item: item.clone(),
                matches,
            }
        })
        .collect();

    Ok(Json(DashboardResponse {
        username: user.username,
        items: own,
    }))
}
