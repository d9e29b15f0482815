//! User and admin credential files: one `username:password` per line.
//! Passwords are stored as-is (hardening is out of scope); the username
//! may not contain the `:` delimiter.

use super::Store;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Usernames double as file keys, so the delimiters are off limits.
pub fn valid_username(name: &str) -> bool {
    !name.is_empty() && !name.contains(':') && !name.contains('|') && !name.contains(char::is_whitespace)
}

fn read_credentials(path: &Path) -> Result<HashMap<String, String>> {
    let mut creds = HashMap::new();
    if !path.exists() {
        return Ok(creds);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    for line in content.lines() {
        let line = line.trim();
        // Split on the first colon only: passwords may contain colons.
        if let Some((username, password)) = line.split_once(':') {
            creds.insert(username.to_string(), password.to_string());
        }
    }
    Ok(creds)
}

impl Store {
    pub fn load_users(&self) -> Result<HashMap<String, String>> {
        read_credentials(&self.users_path())
    }

    pub fn user_exists(&self, username: &str) -> Result<bool> {
        Ok(self.load_users()?.contains_key(username))
    }

    pub fn append_user(&self, username: &str, password: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.users_path())
            .context("Failed to open users file")?;
        writeln!(file, "{}:{}", username, password)?;
        Ok(())
    }

    pub fn verify_user(&self, username: &str, password: &str) -> Result<bool> {
        let users = self.load_users()?;
        Ok(users.get(username).is_some_and(|p| p == password))
    }

    pub fn verify_admin(&self, username: &str, password: &str) -> Result<bool> {
        let admins = read_credentials(&self.admin_path())?;
        Ok(admins.get(username).is_some_and(|p| p == password))
    }
}
