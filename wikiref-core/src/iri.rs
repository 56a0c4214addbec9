//! Generic IRI values split into their RFC 3986 components.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static IRI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
        .expect("valid IRI regex")
});

/// An IRI decomposed into scheme, authority, path, query and fragment.
///
/// `authority` distinguishes `wiki:///Item` (`Some("")`) from `wiki.local:Item`
/// (`None`); the same holds for an empty query (`Item?`) versus none at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Iri {
    pub scheme: Option<String>,
    pub authority: Option<String>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl Iri {
    /// Split `input` into components. Never fails: anything that does not look
    /// like `scheme:...` ends up in the path.
    pub fn parse(input: &str) -> Self {
        let Some(caps) = IRI_RE.captures(input) else {
            return Self {
                path: input.to_string(),
                ..Self::default()
            };
        };
        let part = |i: usize| caps.get(i).map(|m| m.as_str().to_string());

        Self {
            scheme: part(1),
            authority: part(2),
            path: part(3).unwrap_or_default(),
            query: part(4),
            fragment: part(5),
        }
    }

    /// Absolute `wiki:///<path>` IRI for an item path
    pub fn wiki(path: &str) -> Self {
        Self {
            scheme: Some("wiki".to_string()),
            authority: Some(String::new()),
            path: format!("/{}", path.trim_start_matches('/')),
            query: None,
            fragment: None,
        }
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Authority host, `None` when absent or empty
    pub fn host(&self) -> Option<&str> {
        self.authority.as_deref().filter(|a| !a.is_empty())
    }

    /// Query and fragment re-attached the way they were written
    pub fn query_fragment(&self) -> String {
        let mut out = String::new();
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(authority) = &self.authority {
            write!(f, "//{authority}")?;
        }
        write!(f, "{}{}", self.path, self.query_fragment())
    }
}

impl From<&str> for Iri {
    fn from(input: &str) -> Self {
        Iri::parse(input)
    }
}
