//! Interwiki map lookups and the process-wide map cache.

use crate::config::Config;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Alias that always names the local wiki
pub const SELF_WIKI: &str = "Self";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterwikiError {
    #[error("Unknown interwiki name: {0}")]
    UnknownWiki(String),
}

/// Wiki name -> base URL table, read-only once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterwikiMap {
    own_name: String,
    url_prefix: String,
    entries: BTreeMap<String, String>,
}

/// Result of looking up `Wiki:Item`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub wiki_name: String,
    pub base_url: String,
    pub item_name: String,
}

impl Resolved {
    pub fn href(&self) -> String {
        join_wiki(&self.base_url, &self.item_name)
    }
}

impl InterwikiMap {
    pub fn new(own_name: impl Into<String>, url_prefix: &str) -> Self {
        Self {
            own_name: own_name.into(),
            url_prefix: crate::config::normalize_url_prefix(url_prefix),
            entries: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            own_name: config.interwikiname.clone(),
            url_prefix: config.normalized_url_prefix(),
            entries: config.interwiki_map.clone(),
        }
    }

    /// Builder-style entry registration
    pub fn with_entry(mut self, name: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.entries.insert(name.into(), base_url.into());
        self
    }

    pub fn own_name(&self) -> &str {
        &self.own_name
    }

    /// Url prefix of the local wiki, always with leading and trailing slash
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Empty, `Self` or our own registered name
    pub fn is_local(&self, wiki_name: &str) -> bool {
        wiki_name.is_empty() || wiki_name == SELF_WIKI || wiki_name == self.own_name
    }

    /// Base URL for `wiki_name`; local names map to the url prefix
    pub fn base_url(&self, wiki_name: &str) -> Option<&str> {
        if self.is_local(wiki_name) {
            Some(&self.url_prefix)
        } else {
            self.entries.get(wiki_name).map(String::as_str)
        }
    }

    pub fn resolve(&self, wiki_name: &str, item_name: &str) -> Result<Resolved, InterwikiError> {
        let base_url = self
            .base_url(wiki_name)
            .ok_or_else(|| InterwikiError::UnknownWiki(wiki_name.to_string()))?;

        Ok(Resolved {
            wiki_name: wiki_name.to_string(),
            base_url: base_url.to_string(),
            item_name: item_name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split `Wiki:Item` into its parts; text without a colon names a local item.
///
/// ```
/// use wikiref_core::interwiki::split_interwiki;
///
/// assert_eq!(split_interwiki("MoinMoin:FrontPage"), ("MoinMoin", "FrontPage"));
/// assert_eq!(split_interwiki("FrontPage"), ("Self", "FrontPage"));
/// assert_eq!(split_interwiki("MoinMoin:"), ("MoinMoin", ""));
/// ```
pub fn split_interwiki(text: &str) -> (&str, &str) {
    text.split_once(':').unwrap_or((SELF_WIKI, text))
}

/// Join a base URL and an item name; `$PAGE` in the base marks the insertion point
pub fn join_wiki(base_url: &str, item_name: &str) -> String {
    if base_url.contains("$PAGE") {
        base_url.replace("$PAGE", item_name)
    } else {
        format!("{base_url}{item_name}")
    }
}

/// Wiki and item name of a user's home page
pub fn user_home<'a>(map: &InterwikiMap, homewiki: &'a str, username: &'a str) -> (&'a str, &'a str) {
    if map.is_local(homewiki) {
        (SELF_WIKI, username)
    } else {
        (homewiki, username)
    }
}

/// Process-wide interwiki map, swapped wholesale on configuration reload.
///
/// Render passes take an `Arc` snapshot and never see a partially updated map.
#[derive(Debug)]
pub struct InterwikiCache {
    current: RwLock<Arc<InterwikiMap>>,
}

impl InterwikiCache {
    pub fn new(map: InterwikiMap) -> Self {
        Self {
            current: RwLock::new(Arc::new(map)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(InterwikiMap::from_config(config))
    }

    /// Snapshot for one render pass
    pub fn current(&self) -> Arc<InterwikiMap> {
        Arc::clone(&self.current.read())
    }

    /// Replace the cached map after the configuration changed
    pub fn reload(&self, config: &Config) {
        let map = InterwikiMap::from_config(config);
        tracing::info!("Reloaded interwiki map with {} entries", map.len());
        *self.current.write() = Arc::new(map);
    }
}
