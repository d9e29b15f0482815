//! Dataset summary for the admin dashboard.

use crate::model::{Item, ItemKind, ItemStatus};
use serde::Serialize;
use std::collections::BTreeMap;

const RECENT_LIMIT: usize = 5;

#[derive(Serialize, Debug, Clone)]
pub struct Statistics {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub lost: usize,
    pub found: usize,
    pub by_category: BTreeMap<String, usize>,
    pub recent: Vec<Item>,
}

pub fn compute(items: &[Item]) -> Statistics {
    let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
    for item in items {
        *by_category.entry(item.category.clone()).or_insert(0) += 1;
    }

    let mut recent: Vec<Item> = items.to_vec();
    // The timestamp format sorts lexicographically, newest last.
    recent.sort_by(|a, b| b.reported_at.cmp(&a.reported_at));
    recent.truncate(RECENT_LIMIT);

    Statistics {
        total: items.len(),
        pending: count_status(items, ItemStatus::Pending),
        approved: count_status(items, ItemStatus::Approved),
        rejected: count_status(items, ItemStatus::Rejected),
        lost: items.iter().filter(|i| i.kind == ItemKind::Lost).count(),
        found: items.iter().filter(|i| i.kind == ItemKind::Found).count(),
        by_category,
        recent,
    }
}

fn count_status(items: &[Item], status: ItemStatus) -> usize {
    items.iter().filter(|i| i.status == status).count()
}
