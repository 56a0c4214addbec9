//! Data assembly for page chrome: breadcrumbs, navibar, editor attribution.
//!
//! Everything here produces plain values for templates; rendering itself
//! happens elsewhere.

pub mod breadcrumbs;
pub mod editor;
pub mod format;
pub mod navibar;

use crate::config::Config;
use crate::interwiki::{InterwikiMap, Resolved};
use crate::models::{ItemStore, User};

pub use breadcrumbs::{LocationCrumb, TrailCrumb, UserHomeLink};
pub use editor::EditorInfo;
pub use format::{contenttype_to_class, normalize_item_name, shorten_item_name};
pub use navibar::{parse_sister_items, NaviItem, NaviLink, SisterItems};

/// Per-request view over configuration, storage and the current user
pub struct ThemeSupport<'a> {
    config: &'a Config,
    interwiki: &'a InterwikiMap,
    store: &'a dyn ItemStore,
    user: &'a User,
}

impl<'a> ThemeSupport<'a> {
    pub fn new(
        config: &'a Config,
        interwiki: &'a InterwikiMap,
        store: &'a dyn ItemStore,
        user: &'a User,
    ) -> Self {
        Self {
            config,
            interwiki,
            store,
            user,
        }
    }

    /// Href of a local item
    pub fn item_href(&self, item_name: &str) -> String {
        format!("{}{}", self.interwiki.url_prefix(), item_name)
    }

    /// Parent of a sub item, `None` for top-level items
    pub fn parent_item(&self, item_name: &str) -> Option<String> {
        item_name
            .rsplit_once('/')
            .map(|(parent, _)| parent)
            .filter(|parent| !parent.is_empty())
            .map(str::to_string)
    }

    /// Login page URL, if any configured backend takes login input
    pub fn login_url(&self) -> Option<String> {
        let login = self.item_href("+login");
        if self.config.login_inputs() == ["special_no_input"] {
            Some(format!("{login}?login=1"))
        } else if self.config.has_login() {
            Some(login)
        } else {
            None
        }
    }

    /// Interwiki lookup that falls back to the local wiki root for unknown
    /// names; the flag reports the fallback.
    fn resolve_lenient(&self, wiki_name: &str, item_name: &str) -> (Resolved, bool) {
        match self.interwiki.resolve(wiki_name, item_name) {
            Ok(resolved) => (resolved, false),
            Err(err) => {
                tracing::debug!("{err}, linking to the local wiki instead");
                let fallback = Resolved {
                    wiki_name: wiki_name.to_string(),
                    base_url: self.interwiki.url_prefix().to_string(),
                    item_name: item_name.to_string(),
                };
                (fallback, true)
            }
        }
    }
}
