//! Per-reference resolution of link targets into hrefs.

use super::{Category, LinkTarget, RefKind, ResolvedLink};
use crate::interwiki::{join_wiki, InterwikiMap, SELF_WIKI};
use crate::iri::Iri;
use tracing::debug;
use wikiref_types::{attr, Element, ItemName};

/// Resolves link targets against an interwiki map
#[derive(Debug, Clone, Copy)]
pub struct LinkConverter<'a> {
    interwiki: &'a InterwikiMap,
}

/// Outcome of resolving an absolute `wiki:` IRI
enum WikiHref {
    Local { href: String, item: ItemName },
    Foreign(String),
    Unknown(String),
}

impl WikiHref {
    fn into_href(self) -> String {
        match self {
            WikiHref::Local { href, .. } | WikiHref::Foreign(href) | WikiHref::Unknown(href) => href,
        }
    }
}

impl<'a> LinkConverter<'a> {
    pub fn new(interwiki: &'a InterwikiMap) -> Self {
        Self { interwiki }
    }

    /// Rewrite `elem`'s href for an absolute `wiki:` target
    pub fn handle_wiki_links(&self, elem: &mut Element, input: &Iri) {
        elem.set_attr(attr::HREF, self.wiki_href(input).into_href());
    }

    /// Rewrite `elem`'s href for a `wiki.local:` target relative to `page`
    pub fn handle_wikilocal_links(&self, elem: &mut Element, input: &Iri, page: &Iri) {
        let absolute = self.absolute_iri(input, page);
        self.handle_wiki_links(elem, &absolute);
    }

    /// External targets keep their href verbatim
    pub fn handle_external_links(&self, elem: &mut Element, input: &Iri) {
        elem.set_attr(attr::HREF, input.to_string());
    }

    /// Resolve one classified target against the current page
    pub fn resolve(&self, kind: RefKind, target: &LinkTarget, page: &Iri) -> ResolvedLink {
        let resolved = match target {
            LinkTarget::WikiAbsolute(iri) => self.wiki_href(iri),
            LinkTarget::WikiLocal(iri) => self.wiki_href(&self.absolute_iri(iri, page)),
            LinkTarget::External(iri) => {
                return ResolvedLink {
                    href: iri.to_string(),
                    category: Category::External(iri.to_string()),
                }
            }
        };

        match resolved {
            WikiHref::Local { href, item } => ResolvedLink {
                href,
                category: kind.local(item),
            },
            WikiHref::Foreign(href) | WikiHref::Unknown(href) => ResolvedLink {
                href,
                category: Category::External(target.iri().to_string()),
            },
        }
    }

    /// `wiki.local:` target turned into an absolute `wiki:///` IRI
    fn absolute_iri(&self, input: &Iri, page: &Iri) -> Iri {
        Iri {
            scheme: Some(super::WIKI_SCHEME.to_string()),
            authority: Some(String::new()),
            path: absolute_path(&input.path, &page.path),
            query: input.query.clone(),
            fragment: input.fragment.clone(),
        }
    }

    fn wiki_href(&self, input: &Iri) -> WikiHref {
        let wiki_name = input.host().unwrap_or(SELF_WIKI);
        let tail = input.path.strip_prefix('/').unwrap_or(&input.path);

        if self.interwiki.is_local(wiki_name) {
            return WikiHref::Local {
                href: format!(
                    "{}{}{}",
                    self.interwiki.url_prefix(),
                    tail,
                    input.query_fragment()
                ),
                item: item_name(&input.path),
            };
        }

        match self.interwiki.base_url(wiki_name) {
            Some(base_url) => {
                WikiHref::Foreign(format!("{}{}", join_wiki(base_url, tail), input.query_fragment()))
            }
            None => {
                debug!("Unknown interwiki name '{}' in {}", wiki_name, input);
                WikiHref::Unknown(input.to_string())
            }
        }
    }
}

/// Resolve a `wiki.local:` path against the current item path.
///
/// - `""` is the current item itself
/// - `/Sub` is a child of the current item
/// - `..` and `../Other` walk up one level per `..`, never above the wiki root
/// - anything else is taken from the wiki root
///
/// ```
/// use wikiref_core::links::absolute_path;
///
/// assert_eq!(absolute_path("", "/Root"), "/Root");
/// assert_eq!(absolute_path("/Test", "/Root/Sub"), "/Root/Sub/Test");
/// assert_eq!(absolute_path("../Test", "/Root/Sub"), "/Root/Test");
/// assert_eq!(absolute_path("..", "/Root/Sub"), "/Root");
/// assert_eq!(absolute_path("Test", "/Root/Sub"), "/Test");
/// ```
pub fn absolute_path(path: &str, page_path: &str) -> String {
    let mut resolved: Vec<&str> = Vec::new();

    let relative = if path.is_empty() {
        push_segments(&mut resolved, page_path);
        ""
    } else if let Some(child) = path.strip_prefix('/') {
        push_segments(&mut resolved, page_path);
        child
    } else if path.split('/').next() == Some("..") {
        push_segments(&mut resolved, page_path);
        path
    } else {
        path
    };
    push_segments(&mut resolved, relative);

    format!("/{}", resolved.join("/"))
}

fn push_segments<'p>(resolved: &mut Vec<&'p str>, path: &'p str) {
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if resolved.pop().is_none() {
                    debug!("Relative path {:?} walks above the wiki root", path);
                }
            }
            _ => resolved.push(segment),
        }
    }
}

/// Normalized item name of an absolute item path
fn item_name(path: &str) -> ItemName {
    let mut segments = Vec::new();
    push_segments(&mut segments, path);
    ItemName::new(segments.join("/"))
}
