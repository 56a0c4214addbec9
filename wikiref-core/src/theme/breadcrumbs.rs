//! Location breadcrumbs, the visited-items trail and the user home link.

use super::ThemeSupport;
use crate::interwiki::{split_interwiki, user_home, SELF_WIKI};
use serde::Serialize;

/// One segment of the current item's location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationCrumb {
    pub segment: String,
    pub item_name: String,
    pub exists: bool,
}

/// One entry of the user's trail; `wiki_name` is empty for this wiki
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrailCrumb {
    pub wiki_name: String,
    pub item_name: String,
    pub href: String,
    pub exists: bool,
    /// The wiki name was not found in the interwiki map
    pub err: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserHomeLink {
    pub href: String,
    pub aliasname: String,
    pub title: String,
    pub exists: bool,
}

impl ThemeSupport<'_> {
    pub fn location_breadcrumbs(&self, item_name: &str) -> Vec<LocationCrumb> {
        let mut current = String::new();
        item_name
            .split('/')
            .enumerate()
            .map(|(i, segment)| {
                if i > 0 {
                    current.push('/');
                }
                current.push_str(segment);
                LocationCrumb {
                    segment: segment.to_string(),
                    item_name: current.clone(),
                    exists: self.store.has_item(&current),
                }
            })
            .collect()
    }

    pub fn path_breadcrumbs(&self) -> Vec<TrailCrumb> {
        self.user
            .trail
            .iter()
            .map(|entry| {
                let (wiki_name, item_name) = split_interwiki(entry);
                let (resolved, err) = self.resolve_lenient(wiki_name, item_name);
                let href = resolved.href();

                // remote items can't be checked
                let (wiki_name, exists) = if self.interwiki.is_local(wiki_name) {
                    (String::new(), self.store.has_item(item_name))
                } else {
                    (wiki_name.to_string(), true)
                };

                TrailCrumb {
                    wiki_name,
                    item_name: item_name.to_string(),
                    href,
                    exists,
                    err,
                }
            })
            .collect()
    }

    pub fn user_home_link(&self) -> UserHomeLink {
        let aliasname = self.user.display_name().to_string();
        let (wiki_name, item_name) =
            user_home(self.interwiki, &self.config.user_homewiki, &self.user.name);

        let exists = if wiki_name == SELF_WIKI {
            self.store.has_item(item_name)
        } else {
            true
        };
        let (resolved, _) = self.resolve_lenient(wiki_name, item_name);

        UserHomeLink {
            href: resolved.href(),
            title: format!("{aliasname} @ {wiki_name}"),
            aliasname,
            exists,
        }
    }
}
