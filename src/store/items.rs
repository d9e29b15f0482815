//! Item reports: one pipe-delimited record per line in `items.txt`.
//!
//! Layout (11 fields):
//! `id|kind|name|color|location|description|reported_by|status|date|category|contact`
//!
//! Records written by older builds may lack the trailing date, category
//! and contact fields; those default on read. Anything with fewer than
//! 8 fields or an unparseable id/kind/status is skipped.

use super::{escape_field, unescape_field, Store};
use crate::model::{default_category, Item, ItemKind, ItemStatus, NewItem};
use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const MIN_FIELDS: usize = 8;

fn format_line(item: &Item) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}",
        item.id,
        item.kind.as_str(),
        escape_field(&item.name),
        escape_field(&item.color),
        escape_field(&item.location),
        escape_field(&item.description),
        escape_field(&item.reported_by),
        item.status.as_str(),
        item.reported_at,
        escape_field(&item.category),
        escape_field(&item.contact),
    )
}

fn parse_line(line: &str) -> Option<Item> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < MIN_FIELDS {
        return None;
    }
    Some(Item {
        id: parts[0].parse().ok()?,
        kind: ItemKind::parse(parts[1])?,
        name: unescape_field(parts[2]),
        color: unescape_field(parts[3]),
        location: unescape_field(parts[4]),
        description: unescape_field(parts[5]),
        reported_by: unescape_field(parts[6]),
        status: ItemStatus::parse(parts[7])?,
        reported_at: parts.get(8).unwrap_or(&"").to_string(),
        category: parts
            .get(9)
            .filter(|s| !s.is_empty())
            .map(|s| unescape_field(s))
            .unwrap_or_else(default_category),
        contact: parts.get(10).map(|s| unescape_field(s)).unwrap_or_default(),
    })
}

impl Store {
    /// All items in file order. Malformed lines are silently dropped.
    pub fn load_items(&self) -> Result<Vec<Item>> {
        let path = self.items_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .filter_map(parse_line)
            .collect())
    }

    /// Persist a new report as pending, stamped with the current local
    /// time. Ids are max(existing) + 1 so deletes never cause reuse.
    pub fn append_item(&self, new: NewItem, kind: ItemKind, reported_by: &str) -> Result<Item> {
        let items = self.load_items()?;
        let id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let item = Item {
            id,
            kind,
            name: new.name,
            color: new.color,
            location: new.location,
            description: new.description,
            reported_by: reported_by.to_string(),
            status: ItemStatus::Pending,
            reported_at: Local::now().format(DATE_FORMAT).to_string(),
            category: new.category,
            contact: new.contact,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.items_path())
            .context("Failed to open items file")?;
        writeln!(file, "{}", format_line(&item))?;
        Ok(item)
    }

    fn rewrite_items(&self, items: &[Item]) -> Result<()> {
        let mut out = String::new();
        for item in items {
            out.push_str(&format_line(item));
            out.push('\n');
        }
        fs::write(self.items_path(), out).context("Failed to rewrite items file")?;
        Ok(())
    }

    /// Set an item's approval status. Returns false when the id is unknown.
    pub fn update_status(&self, id: u64, status: ItemStatus) -> Result<bool> {
        let mut items = self.load_items()?;
        let mut touched = false;
        for item in items.iter_mut() {
            if item.id == id {
                item.status = status;
                touched = true;
            }
        }
        if touched {
            self.rewrite_items(&items)?;
        }
        Ok(touched)
    }

    /// Remove an item. Returns false when the id is unknown.
    pub fn delete_item(&self, id: u64) -> Result<bool> {
        let items = self.load_items()?;
        let before = items.len();
        let kept: Vec<Item> = items.into_iter().filter(|i| i.id != id).collect();
        let removed = kept.len() != before;
        if removed {
            self.rewrite_items(&kept)?;
        }
        Ok(removed)
    }
}
