//! Domain types for the lost & found registry.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Lost,
    Found,
}

impl ItemKind {
    /// The kind a match candidate must have: lost items match found ones
    /// and vice versa.
    pub fn opposite(self) -> Self {
        match self {
            ItemKind::Lost => ItemKind::Found,
            ItemKind::Found => ItemKind::Lost,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Lost => "lost",
            ItemKind::Found => "found",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lost" => Some(ItemKind::Lost),
            "found" => Some(ItemKind::Found),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Approved => "approved",
            ItemStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ItemStatus::Pending),
            "approved" => Some(ItemStatus::Approved),
            "rejected" => Some(ItemStatus::Rejected),
            _ => None,
        }
    }
}

/// A lost or found report as stored in `items.txt`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Item {
    pub id: u64,
    pub kind: ItemKind,
    pub name: String,
    pub color: String,
    pub location: String,
    pub description: String,
    pub reported_by: String,
    pub status: ItemStatus,
    /// `%Y-%m-%d %H:%M:%S`, sorts lexicographically.
    pub reported_at: String,
    pub category: String,
    pub contact: String,
}

/// User-supplied fields of a new report. Kind, reporter, status and
/// timestamp are filled in by the store.
#[derive(Deserialize, Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub color: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub contact: String,
}

pub fn default_category() -> String {
    "other".to_string()
}

impl NewItem {
    /// Trim the headline fields. Name, color and location must survive
    /// trimming; description and contact may be empty.
    pub fn normalized(mut self) -> Option<Self> {
        self.name = self.name.trim().to_string();
        self.color = self.color.trim().to_string();
        self.location = self.location.trim().to_string();
        self.description = self.description.trim().to_string();
        self.contact = self.contact.trim().to_string();
        if self.category.trim().is_empty() {
            self.category = default_category();
        } else {
            self.category = self.category.trim().to_string();
        }
        if self.name.is_empty() || self.color.is_empty() || self.location.is_empty() {
            return None;
        }
        Some(self)
    }
}
