//! Link and transclusion resolution for converted document trees.
//!
//! Targets come in three flavours: `wiki:` (absolute, possibly naming another
//! wiki in the authority), `wiki.local:` (relative to the current item) and
//! anything else, which is passed through as an external link.

pub mod refs;
pub mod resolve;

use crate::iri::Iri;
use wikiref_types::{ItemName, NodePath};

pub use refs::{collect_references, ItemRefs};
pub use resolve::{absolute_path, LinkConverter};

pub const WIKI_SCHEME: &str = "wiki";
pub const WIKI_LOCAL_SCHEME: &str = "wiki.local";

/// A classified link target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    WikiAbsolute(Iri),
    WikiLocal(Iri),
    External(Iri),
}

impl LinkTarget {
    /// Classify by scheme alone; unknown or missing schemes are external
    pub fn classify(iri: Iri) -> Self {
        match iri.scheme() {
            Some(WIKI_SCHEME) => LinkTarget::WikiAbsolute(iri),
            Some(WIKI_LOCAL_SCHEME) => LinkTarget::WikiLocal(iri),
            _ => LinkTarget::External(iri),
        }
    }

    pub fn iri(&self) -> &Iri {
        match self {
            LinkTarget::WikiAbsolute(iri) | LinkTarget::WikiLocal(iri) | LinkTarget::External(iri) => {
                iri
            }
        }
    }
}

/// Whether a reference links to or embeds its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    Link,
    Transclusion,
}

/// Bucket a resolved reference is recorded in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Link(ItemName),
    Transclusion(ItemName),
    /// Raw target string, for external and foreign-wiki targets
    External(String),
}

impl RefKind {
    fn local(self, item: ItemName) -> Category {
        match self {
            RefKind::Link => Category::Link(item),
            RefKind::Transclusion => Category::Transclusion(item),
        }
    }
}

/// Render-ready href plus the bucket the reference belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub href: String,
    pub category: Category,
}

/// One `a` or `include` element found in a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    pub target: Iri,
    pub kind: RefKind,
    pub path: NodePath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_scheme() {
        assert!(matches!(
            LinkTarget::classify(Iri::parse("wiki:///Test")),
            LinkTarget::WikiAbsolute(_)
        ));
        assert!(matches!(
            LinkTarget::classify(Iri::parse("wiki://MoinMoin/Test")),
            LinkTarget::WikiAbsolute(_)
        ));
        assert!(matches!(
            LinkTarget::classify(Iri::parse("wiki.local:../Test")),
            LinkTarget::WikiLocal(_)
        ));
        for external in ["http://moinmo.in/", "mailto:a@b.org", "Test", "wikilocal:x", ""] {
            assert!(matches!(
                LinkTarget::classify(Iri::parse(external)),
                LinkTarget::External(_)
            ));
        }
    }

    #[test]
    fn test_iri_accessor() {
        let target = LinkTarget::classify(Iri::parse("wiki.local:Foo"));
        assert_eq!(target.iri().path, "Foo");
    }
}
