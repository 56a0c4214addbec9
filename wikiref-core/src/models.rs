//! User and revision records plus the lookups theme and auth code need.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// A wiki user as seen by theme and login code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub aliasname: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Publish the email address as editor attribution
    #[serde(default)]
    pub mailto_author: bool,

    /// Navibar entries chosen by the user
    #[serde(default)]
    pub quicklinks: Vec<String>,

    /// Recently visited `Wiki:Item` names, oldest first
    #[serde(default)]
    pub trail: Vec<String>,

    #[serde(default)]
    pub valid: bool,

    #[serde(default)]
    pub auth_method: Option<String>,
}

impl User {
    /// Anonymous, not logged in
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            valid: true,
            ..Self::default()
        }
    }

    /// Alias if set, else the login name
    pub fn display_name(&self) -> &str {
        self.aliasname
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(&self.name)
    }
}

/// Editor-related metadata of a stored revision
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionMeta {
    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub hostname: Option<String>,

    #[serde(default)]
    pub userid: Option<String>,
}

/// Existence checks against item storage
pub trait ItemStore {
    fn has_item(&self, name: &str) -> bool;
}

impl ItemStore for HashSet<String> {
    fn has_item(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl ItemStore for BTreeSet<String> {
    fn has_item(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// User profile lookups and credential checks
pub trait UserDirectory {
    fn by_id(&self, id: &str) -> Option<User>;

    fn by_name(&self, name: &str) -> Option<User>;

    fn check_password(&self, name: &str, password: &str) -> bool;

    /// Create a profile for an externally authenticated user
    fn create(&self, name: &str) -> Option<User>;
}
