//! Flat-file persistence layer.
//!
//! Users, admin credentials and item reports live in delimited text
//! files under a data directory. Reads parse the whole file; updates
//! rewrite it. Callers serialize access through the shared state lock.

pub mod items;
pub mod users;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const USERS_FILE: &str = "users.txt";
pub const ITEMS_FILE: &str = "items.txt";
pub const ADMIN_FILE: &str = "admin.txt";

pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    /// Open (and if needed create) the data directory. Seeds the admin
    /// credential file when it does not exist yet.
    pub fn open(data_dir: &Path, admin_user: &str, admin_password: &str) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;
        let store = Self {
            data_dir: data_dir.to_path_buf(),
        };
        let admin_path = store.admin_path();
        if !admin_path.exists() {
            fs::write(&admin_path, format!("{}:{}\n", admin_user, admin_password))
                .context("Failed to seed admin file")?;
        }
        Ok(store)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    pub fn items_path(&self) -> PathBuf {
        self.data_dir.join(ITEMS_FILE)
    }

    pub fn admin_path(&self) -> PathBuf {
        self.data_dir.join(ADMIN_FILE)
    }
}

/// Escape the record delimiter (and backslash/newline) so user text
/// survives the pipe-delimited format. The only sanitization in scope.
pub(crate) fn escape_field(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '|' => out.push_str("\\p"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

pub(crate) fn unescape_field(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('p') => out.push('|'),
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
pub(crate) fn test_store(name: &str) -> Store {
    let dir = std::env::temp_dir().join(format!("lostfound_test_{}", name));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).expect("clean temp dir");
    }
    Store::open(&dir, "admin", "admin123").expect("open store")
}
