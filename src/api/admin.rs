//! Admin review surface: dashboard, approve/reject/delete, statistics.

use super::error::ApiError;
use super::extract::CurrentAdmin;
use crate::core::state::SharedState;
use crate::model::{Item, ItemStatus};
use crate::stats::{self, Statistics};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Deserialize, Debug, Default)]
pub struct AdminFilter {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct AdminDashboardResponse {
    pub pending: Vec<Item>,
    pub items: Vec<Item>,
    pub stats: Statistics,
}

fn is_all(value: &Option<String>) -> bool {
    match value.as_deref() {
        None | Some("") | Some("all") => true,
        _ => false,
    }
}

fn apply_filter(items: Vec<Item>, filter: &AdminFilter) -> Vec<Item> {
    let mut out = items;
    if !is_all(&filter.kind) {
        let kind = filter.kind.as_deref().unwrap_or_default();
        out.retain(|i| i.kind.as_str() == kind);
    }
    if !is_all(&filter.status) {
        let status = filter.status.as_deref().unwrap_or_default();
        out.retain(|i| i.status.as_str() == status);
    }
    if let Some(q) = filter.q.as_deref().filter(|q| !q.is_empty()) {
        let q = q.to_lowercase();
        // Admin search covers name, location and description.
        out.retain(|i| {
            i.name.to_lowercase().contains(&q)
                || i.location.to_lowercase().contains(&q)
                || i.description.to_lowercase().contains(&q)
        });
    }
    out
}

pub async fn admin_dashboard(
    State(state): State<SharedState>,
    _admin: CurrentAdmin,
    Query(filter): Query<AdminFilter>,
) -> Result<Json<AdminDashboardResponse>, ApiError> {
    let items = state.store.lock().await.load_items()?;
    let pending: Vec<Item> = items
        .iter()
        .filter(|i| i.status == ItemStatus::Pending)
        .cloned()
        .collect();
    let stats = stats::compute(&items);
    let filtered = apply_filter(items, &filter);

    Ok(Json(AdminDashboardResponse {
        pending,
        items: filtered,
        stats,
    }))
}

pub async fn approve_item(
    state: State<SharedState>,
    admin: CurrentAdmin,
    id: Path<u64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    set_status(state, admin, id, ItemStatus::Approved, "Item approved successfully!").await
}

pub async fn reject_item(
    state: State<SharedState>,
    admin: CurrentAdmin,
    id: Path<u64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    set_status(state, admin, id, ItemStatus::Rejected, "Item rejected.").await
}

async fn set_status(
    State(state): State<SharedState>,
    _admin: CurrentAdmin,
    Path(id): Path<u64>,
    status: ItemStatus,
    message: &str,
) -> Result<Json<serde_json::Value>, ApiError> {
    let touched = state.store.lock().await.update_status(id, status)?;
    if !touched {
        return Err(ApiError::NotFound(format!("No item with id {}", id)));
    }
    Ok(Json(json!({ "message": message })))
}

pub async fn delete_item(
    State(state): State<SharedState>,
    _admin: CurrentAdmin,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let removed = state.store.lock().await.delete_item(id)?;
    if !removed {
        return Err(ApiError::NotFound(format!("No item with id {}", id)));
    }
    Ok(Json(json!({ "message": "Item deleted successfully." })))
}

pub async fn statistics(
    State(state): State<SharedState>,
    _admin: CurrentAdmin,
) -> Result<Json<Statistics>, ApiError> {
    let items = state.store.lock().await.load_items()?;
    Ok(Json(stats::compute(&items)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemKind;

    fn item(id: u64, kind: ItemKind, status: ItemStatus, name: &str, location: &str) -> Item {
        Item {
            id,
            kind,
            name: name.to_string(),
            color: "grey".to_string(),
            location: location.to_string(),
            description: String::new(),
            reported_by: "someone".to_string(),
            status,
            reported_at: "2026-03-01 12:00:00".to_string(),
            category: "other".to_string(),
            contact: String::new(),
        }
    }

    #[test]
    fn test_filter_all_is_identity() {
        let items = vec![
            item(1, ItemKind::Lost, ItemStatus::Pending, "Keys", "gate"),
            item(2, ItemKind::Found, ItemStatus::Approved, "Bag", "gym"),
        ];
        let filter = AdminFilter {
            kind: Some("all".to_string()),
            status: None,
            q: Some(String::new()),
        };
        assert_eq!(apply_filter(items.clone(), &filter).len(), items.len());
    }

    #[test]
    fn test_filter_combines_predicates() {
        let items = vec![
            item(1, ItemKind::Lost, ItemStatus::Pending, "Keys", "main gate"),
            item(2, ItemKind::Lost, ItemStatus::Approved, "House keys", "gym"),
            item(3, ItemKind::Found, ItemStatus::Pending, "Keys", "main gate"),
        ];
        let filter = AdminFilter {
            kind: Some("lost".to_string()),
            status: Some("pending".to_string()),
            q: Some("KEYS".to_string()),
        };
        let out = apply_filter(items, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn test_filter_searches_location_and_description() {
        let mut described = item(1, ItemKind::Lost, ItemStatus::Pending, "Bag", "gym");
        described.description = "blue canvas".to_string();
        let items = vec![
            described,
            item(2, ItemKind::Lost, ItemStatus::Pending, "Bag", "library"),
        ];
        let filter = AdminFilter {
            q: Some("canvas".to_string()),
            ..Default::default()
        };
        let out = apply_filter(items, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }
}
