//! Public browsing and search over approved items.

use super::error::ApiError;
use crate::core::state::SharedState;
use crate::model::{Item, ItemStatus};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Deserialize, Debug, Default)]
pub struct BrowseQuery {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct BrowseResponse {
    pub items: Vec<Item>,
    /// Distinct categories across the whole dataset, for filter menus.
    pub categories: Vec<String>,
}

fn wants(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != "all")
}

fn filter_approved(items: &[Item], query: &BrowseQuery) -> Vec<Item> {
    let mut out: Vec<Item> = items
        .iter()
        .filter(|i| i.status == ItemStatus::Approved)
        .cloned()
        .collect();
    if let Some(kind) = wants(&query.kind) {
        out.retain(|i| i.kind.as_str() == kind);
    }
    if let Some(category) = wants(&query.category) {
        out.retain(|i| i.category == category);
    }
    if let Some(q) = query.q.as_deref().filter(|q| !q.is_empty()) {
        let q = q.to_lowercase();
        out.retain(|i| {
            i.name.to_lowercase().contains(&q)
                || i.color.to_lowercase().contains(&q)
                || i.location.to_lowercase().contains(&q)
                || i.description.to_lowercase().contains(&q)
        });
    }
    out
}

pub async fn browse_items(
    State(state): State<SharedState>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<BrowseResponse>, ApiError> {
    let items = state.store.lock().await.load_items()?;
    let categories: BTreeSet<String> = items.iter().map(|i| i.category.clone()).collect();
    Ok(Json(BrowseResponse {
        items: filter_approved(&items, &query),
        categories: categories.into_iter().collect(),
    }))
}

pub async fn search_items(
    State(state): State<SharedState>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store.lock().await.load_items()?;
    Ok(Json(filter_approved(&items, &query)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemKind;

    fn item(id: u64, kind: ItemKind, status: ItemStatus, name: &str, category: &str) -> Item {
        Item {
            id,
            kind,
            name: name.to_string(),
            color: "red".to_string(),
            location: "campus".to_string(),
            description: String::new(),
            reported_by: "someone".to_string(),
            status,
            reported_at: "2026-03-01 12:00:00".to_string(),
            category: category.to_string(),
            contact: String::new(),
        }
    }

    #[test]
    fn test_only_approved_visible() {
        let items = vec![
            item(1, ItemKind::Lost, ItemStatus::Pending, "Wallet", "other"),
            item(2, ItemKind::Lost, ItemStatus::Approved, "Wallet", "other"),
            item(3, ItemKind::Found, ItemStatus::Rejected, "Wallet", "other"),
        ];
        let out = filter_approved(&items, &BrowseQuery::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 2);
    }

    #[test]
    fn test_kind_and_category_filters() {
        let items = vec![
            item(1, ItemKind::Lost, ItemStatus::Approved, "Phone", "electronics"),
            item(2, ItemKind::Found, ItemStatus::Approved, "Phone", "electronics"),
            item(3, ItemKind::Found, ItemStatus::Approved, "Scarf", "clothing"),
        ];
        let query = BrowseQuery {
            kind: Some("found".to_string()),
            category: Some("electronics".to_string()),
            q: None,
        };
        let out = filter_approved(&items, &query);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 2);
    }

    #[test]
    fn test_text_search_covers_color() {
        let items = vec![item(1, ItemKind::Lost, ItemStatus::Approved, "Cap", "other")];
        let query = BrowseQuery {
            q: Some("RED".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_approved(&items, &query).len(), 1);

        let query = BrowseQuery {
            q: Some("purple".to_string()),
            ..Default::default()
        };
        assert!(filter_approved(&items, &query).is_empty());
    }
}
