//! Navibar assembly: configured entries, user quick links and sister sites.

use super::{format::normalize_item_name, ThemeSupport};
use crate::interwiki::split_interwiki;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?|ftp|ftps|file|mailto|news|nntp|telnet|irc|ircs|ssh|sftp|xmpp|webcal):")
        .expect("valid url regex")
});

/// Item name -> URL on a sister wiki
pub type SisterItems = HashMap<String, String>;

/// Result of splitting a navibar link text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NaviLink {
    pub href: String,
    pub title: String,
    /// Empty for this wiki
    pub wiki: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NaviItem {
    pub css_class: String,
    pub href: String,
    pub text: String,
    pub title: String,
}

impl NaviItem {
    fn new(css_class: &str, href: impl Into<String>, text: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            css_class: css_class.to_string(),
            href: href.into(),
            text: text.into(),
            title: title.into(),
        }
    }
}

/// Parse a sister site item list: one `url item name` pair per line.
/// Lines without a separating blank are skipped.
pub fn parse_sister_items(text: &str) -> SisterItems {
    let mut items = SisterItems::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match line.split_once(' ') {
            Some((url, name)) => {
                items.insert(name.to_string(), url.to_string());
            }
            None => tracing::debug!("Skipping invalid sister item line: {line}"),
        }
    }
    items
}

impl ThemeSupport<'_> {
    /// Split navibar link text into href, title and wiki name.
    ///
    /// Supports `ItemName`, `Wiki:ItemName`, `wiki:Wiki:ItemName`, URLs and any
    /// of these as `[[target|title]]`.
    pub fn split_navilink(&self, text: &str) -> NaviLink {
        let (target, title) = match text.strip_prefix("[[").and_then(|t| t.strip_suffix("]]")) {
            Some(inner) => match inner.split_once('|') {
                Some((target, title)) => (target.trim(), Some(title.trim())),
                None => (inner.trim(), None),
            },
            None => (text, None),
        };
        let title = title.filter(|t| !t.is_empty());

        if URL_RE.is_match(target) {
            return NaviLink {
                href: target.to_string(),
                title: title.unwrap_or(target).to_string(),
                wiki: String::new(),
            };
        }

        let target = target.strip_prefix("wiki:").unwrap_or(target);
        let (wiki_name, item_name) = split_interwiki(target);
        if !self.interwiki.is_local(wiki_name) {
            let (resolved, _) = self.resolve_lenient(wiki_name, item_name);
            return NaviLink {
                href: resolved.href(),
                title: title.unwrap_or(item_name).to_string(),
                wiki: wiki_name.to_string(),
            };
        }

        let item_name = normalize_item_name(item_name);
        NaviLink {
            href: self.item_href(&item_name),
            title: title.map(str::to_string).unwrap_or(item_name),
            wiki: String::new(),
        }
    }

    /// Assemble the navibar for `item_name`.
    ///
    /// `sisters` holds the already fetched item lists keyed by sister name.
    pub fn navibar(&self, item_name: &str, sisters: &HashMap<String, SisterItems>) -> Vec<NaviItem> {
        let mut items: Vec<NaviItem> = self
            .config
            .navi_bar
            .iter()
            .map(|entry| NaviItem::new(&entry.css_class, &entry.href, &entry.text, &entry.title))
            .collect();

        for text in &self.user.quicklinks {
            let link = self.split_navilink(text);
            items.push(NaviItem::new("userlink", link.href, link.title, link.wiki));
        }

        for sister in &self.config.sistersites {
            if sister.name == self.config.interwikiname {
                items.push(NaviItem::new("sisterwiki current", &sister.url, &sister.name, ""));
                continue;
            }
            match sisters.get(&sister.name) {
                Some(list) => {
                    if let Some(url) = list.get(item_name) {
                        items.push(NaviItem::new("sisterwiki", url, &sister.name, ""));
                    }
                }
                None => tracing::debug!("No item list loaded for sister site {}", sister.name),
            }
        }

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::interwiki::InterwikiMap;
    use crate::models::User;
    use std::collections::HashSet;

    fn map() -> InterwikiMap {
        InterwikiMap::new("MyWiki", "/").with_entry("MoinMoin", "http://moinmo.in/")
    }

    fn split(text: &str) -> NaviLink {
        let config = Config::default();
        let map = map();
        let store: HashSet<String> = HashSet::new();
        let user = User::anonymous();
        ThemeSupport::new(&config, &map, &store, &user).split_navilink(text)
    }

    #[test]
    fn test_split_navilink() {
        let cases = [
            ("FrontPage", ("/FrontPage", "FrontPage", "")),
            ("[[FrontPage|Start]]", ("/FrontPage", "Start", "")),
            ("[[ Front   Page ]]", ("/Front Page", "Front Page", "")),
            ("MyWiki:FrontPage", ("/FrontPage", "FrontPage", "")),
            ("MoinMoin:FrontPage", ("http://moinmo.in/FrontPage", "FrontPage", "MoinMoin")),
            ("wiki:MoinMoin:FrontPage", ("http://moinmo.in/FrontPage", "FrontPage", "MoinMoin")),
            ("[[MoinMoin:FrontPage|Moin]]", ("http://moinmo.in/FrontPage", "Moin", "MoinMoin")),
            ("http://example.org/", ("http://example.org/", "http://example.org/", "")),
            ("[[http://example.org/|Example]]", ("http://example.org/", "Example", "")),
        ];
        for (text, (href, title, wiki)) in cases {
            let link = split(text);
            assert_eq!(
                (link.href.as_str(), link.title.as_str(), link.wiki.as_str()),
                (href, title, wiki),
                "text {text}"
            );
        }
    }

    #[test]
    fn test_parse_sister_items() {
        let items = parse_sister_items(
            "http://other.example.org/Home Home\n\nbroken\nhttp://other.example.org/A_B A B\n",
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items["Home"], "http://other.example.org/Home");
        assert_eq!(items["A B"], "http://other.example.org/A_B");
    }

    #[test]
    fn test_navibar() {
        let config = Config::parse(
            r#"
interwikiname: MyWiki
navi_bar:
  - href: /RecentChanges
    text: Recent Changes
sistersites:
  - name: MyWiki
    url: http://my.example.org/sisterpages
  - name: OtherWiki
    url: http://other.example.org/sisterpages
  - name: Unloaded
    url: http://unloaded.example.org/sisterpages
"#,
        )
        .unwrap();
        let map = InterwikiMap::from_config(&config).with_entry("MoinMoin", "http://moinmo.in/");
        let store: HashSet<String> = HashSet::new();
        let mut user = User::named("JoeDoe");
        user.quicklinks = vec!["MoinMoin:FrontPage".into(), "[[Home|My Home]]".into()];

        let mut sisters = HashMap::new();
        sisters.insert(
            "OtherWiki".to_string(),
            parse_sister_items("http://other.example.org/Home Home"),
        );

        let theme = ThemeSupport::new(&config, &map, &store, &user);
        let bar = theme.navibar("Home", &sisters);
        let summary: Vec<_> = bar
            .iter()
            .map(|i| (i.css_class.as_str(), i.href.as_str(), i.text.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("wikilink", "/RecentChanges", "Recent Changes"),
                ("userlink", "http://moinmo.in/FrontPage", "FrontPage"),
                ("userlink", "/Home", "My Home"),
                ("sisterwiki current", "http://my.example.org/sisterpages", "MyWiki"),
                ("sisterwiki", "http://other.example.org/Home", "OtherWiki"),
            ]
        );
        assert_eq!(bar[1].title, "MoinMoin");

        let elsewhere = theme.navibar("NotOnSisters", &sisters);
        assert_eq!(elsewhere.len(), 4);
    }
}
