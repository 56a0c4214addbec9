//! Editor attribution for revision listings.

use super::ThemeSupport;
use crate::models::{RevisionMeta, UserDirectory};
use serde::Serialize;

/// Length of a dotted IPv4 address, used to cut long hostnames
const HOST_DISPLAY_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorInfo {
    pub name: Option<String>,
    /// Link text
    pub text: String,
    pub css: String,
    pub title: String,
    /// Author home page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ThemeSupport<'_> {
    /// Describe who made `rev`: a known user, or the host/address it came from
    pub fn editor_info(&self, rev: &RevisionMeta, users: &dyn UserDirectory) -> EditorInfo {
        let mut info = EditorInfo {
            name: None,
            text: "anonymous".to_string(),
            css: "editor".to_string(),
            title: String::new(),
            uri: None,
            email: None,
        };

        if let Some(addr) = rev.address.as_deref().filter(|_| self.config.show_hosts) {
            match rev.hostname.as_deref() {
                Some(hostname) => {
                    info.text = hostname.chars().take(HOST_DISPLAY_LEN).collect();
                    info.title = format!("{hostname}[{addr}]");
                    info.name = Some(info.title.clone());
                    info.css = "editor host".to_string();
                }
                None => {
                    info.text = addr.to_string();
                    info.name = Some(addr.to_string());
                    info.title = format!("[{addr}]");
                    info.css = "editor ip".to_string();
                }
            }
        }

        let Some(userid) = rev.userid.as_deref() else {
            return info;
        };
        let Some(user) = users.by_id(userid) else {
            tracing::debug!("Revision editor {userid} not found");
            return info;
        };

        let aliasname = user.display_name();
        info.title = if info.title.is_empty() {
            aliasname.to_string()
        } else {
            format!("{aliasname} @ {}", info.title)
        };
        info.name = Some(user.name.clone());
        info.text = user.name.clone();

        match user.email.as_deref().filter(|_| user.mailto_author) {
            Some(email) => {
                info.email = Some(email.to_string());
                info.css = "editor mail".to_string();
            }
            None if self.interwiki.is_local(&self.config.user_homewiki) => {
                info.css = "editor homepage local".to_string();
                info.uri = Some(self.item_href(&user.name));
            }
            None => {
                info.css = "editor homepage interwiki".to_string();
                let (resolved, _) = self.resolve_lenient(&self.config.user_homewiki, &user.name);
                info.uri = Some(resolved.href());
            }
        }

        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::interwiki::InterwikiMap;
    use crate::models::User;
    use std::collections::HashSet;

    struct Users(Vec<User>);

    impl UserDirectory for Users {
        fn by_id(&self, id: &str) -> Option<User> {
            self.0.iter().find(|u| u.id.as_deref() == Some(id)).cloned()
        }

        fn by_name(&self, name: &str) -> Option<User> {
            self.0.iter().find(|u| u.name == name).cloned()
        }

        fn check_password(&self, _name: &str, _password: &str) -> bool {
            false
        }

        fn create(&self, _name: &str) -> Option<User> {
            None
        }
    }

    fn users() -> Users {
        let mut joe = User::named("JoeDoe");
        joe.id = Some("u1".into());
        joe.aliasname = Some("Joe".into());

        let mut ann = User::named("Ann");
        ann.id = Some("u2".into());
        ann.email = Some("ann@example.org".into());
        ann.mailto_author = true;

        Users(vec![joe, ann])
    }

    fn info(config: &Config, rev: RevisionMeta) -> EditorInfo {
        let map = InterwikiMap::from_config(config).with_entry("MoinMoin", "http://moinmo.in/");
        let store: HashSet<String> = HashSet::new();
        let user = User::anonymous();
        ThemeSupport::new(config, &map, &store, &user).editor_info(&rev, &users())
    }

    #[test]
    fn test_anonymous() {
        let result = info(&Config::default(), RevisionMeta::default());
        assert_eq!(result.text, "anonymous");
        assert_eq!(result.css, "editor");
        assert_eq!(result.name, None);
    }

    #[test]
    fn test_host_and_ip() {
        let rev = RevisionMeta {
            address: Some("192.0.2.1".into()),
            hostname: Some("a-very-long-hostname.example.org".into()),
            userid: None,
        };
        let host = info(&Config::default(), rev.clone());
        assert_eq!(host.text, "a-very-long-hos");
        assert_eq!(host.title, "a-very-long-hostname.example.org[192.0.2.1]");
        assert_eq!(host.css, "editor host");

        let ip = info(
            &Config::default(),
            RevisionMeta {
                hostname: None,
                ..rev.clone()
            },
        );
        assert_eq!(ip.text, "192.0.2.1");
        assert_eq!(ip.title, "[192.0.2.1]");
        assert_eq!(ip.css, "editor ip");

        let hidden = info(&Config::parse("show_hosts: false").unwrap(), rev);
        assert_eq!(hidden.text, "anonymous");
    }

    #[test]
    fn test_known_user_homepage() {
        let rev = RevisionMeta {
            address: Some("192.0.2.1".into()),
            hostname: None,
            userid: Some("u1".into()),
        };
        let local = info(&Config::default(), rev.clone());
        assert_eq!(local.text, "JoeDoe");
        assert_eq!(local.title, "Joe @ [192.0.2.1]");
        assert_eq!(local.css, "editor homepage local");
        assert_eq!(local.uri.as_deref(), Some("/JoeDoe"));

        let remote = info(&Config::parse("user_homewiki: MoinMoin").unwrap(), rev);
        assert_eq!(remote.css, "editor homepage interwiki");
        assert_eq!(remote.uri.as_deref(), Some("http://moinmo.in/JoeDoe"));
    }

    #[test]
    fn test_mail_author() {
        let rev = RevisionMeta {
            userid: Some("u2".into()),
            ..RevisionMeta::default()
        };
        let result = info(&Config::default(), rev);
        assert_eq!(result.title, "Ann");
        assert_eq!(result.css, "editor mail");
        assert_eq!(result.email.as_deref(), Some("ann@example.org"));
        assert_eq!(result.uri, None);
    }

    #[test]
    fn test_unknown_user_keeps_host_attribution() {
        let rev = RevisionMeta {
            address: Some("192.0.2.1".into()),
            hostname: None,
            userid: Some("ghost".into()),
        };
        assert_eq!(info(&Config::default(), rev).css, "editor ip");
    }
}
