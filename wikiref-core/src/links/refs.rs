//! Whole-tree pass collecting the item references of a page.

use super::{Category, LinkConverter, LinkReference, LinkTarget, RefKind};
use crate::iri::Iri;
use serde::Serialize;
use wikiref_types::{attr, Element, ItemName, Node, NodePath, Tag};

/// Item references of one page, in document order and not deduplicated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemRefs {
    links: Vec<ItemName>,
    transclusions: Vec<ItemName>,
    external_links: Vec<String>,
}

impl ItemRefs {
    /// Local items linked to
    pub fn links(&self) -> &[ItemName] {
        &self.links
    }

    /// Local items transcluded
    pub fn transclusions(&self) -> &[ItemName] {
        &self.transclusions
    }

    /// Raw targets of every non-local link or transclusion
    pub fn external_links(&self) -> &[String] {
        &self.external_links
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.transclusions.is_empty() && self.external_links.is_empty()
    }

    fn record(&mut self, category: Category) {
        match category {
            Category::Link(item) => self.links.push(item),
            Category::Transclusion(item) => self.transclusions.push(item),
            Category::External(raw) => self.external_links.push(raw),
        }
    }
}

/// Every `a` and `include` element with an href, depth-first in document order
pub fn collect_references(tree: &Element) -> Vec<LinkReference> {
    let mut found = Vec::new();
    visit(tree, NodePath::root(), &mut found);
    found
}

fn visit(elem: &Element, path: NodePath, found: &mut Vec<LinkReference>) {
    let kind = match elem.tag {
        Tag::A => Some(RefKind::Link),
        Tag::Include => Some(RefKind::Transclusion),
        _ => None,
    };
    if let (Some(kind), Some(href)) = (kind, elem.attr(attr::HREF)) {
        found.push(LinkReference {
            target: Iri::parse(href),
            kind,
            path: path.clone(),
        });
    }

    for (index, child) in elem.children.iter().enumerate() {
        if let Node::Element(child) = child {
            visit(child, path.child(index), found);
        }
    }
}

impl LinkConverter<'_> {
    /// Resolve every reference in `tree`, rewriting hrefs in place.
    ///
    /// The tree is owned for the duration of the pass and handed back with
    /// the collected references.
    pub fn convert(&self, mut tree: Element) -> (Element, ItemRefs) {
        let page = match tree.attr(attr::PAGE_HREF) {
            Some(href) => Iri::parse(href),
            None => {
                tracing::debug!("Tree has no {} attribute, resolving from the wiki root", attr::PAGE_HREF);
                Iri::wiki("")
            }
        };

        let mut refs = ItemRefs::default();
        for reference in collect_references(&tree) {
            let target = LinkTarget::classify(reference.target);
            let resolved = self.resolve(reference.kind, &target, &page);

            if let Some(elem) = tree.get_mut(&reference.path) {
                elem.set_attr(attr::HREF, resolved.href);
            }
            refs.record(resolved.category);
        }

        (tree, refs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interwiki::InterwikiMap;

    fn link(href: &str) -> Element {
        Element::new(Tag::A).with_attr(attr::HREF, href)
    }

    fn include(href: &str) -> Element {
        Element::new(Tag::Include).with_attr(attr::HREF, href)
    }

    #[test]
    fn test_collect_in_document_order() {
        let tree = Element::new(Tag::Page).with_child(
            Element::new(Tag::Body)
                .with_child(Element::new(Tag::P).with_child(include("wiki.local:A")).with_child(link("wiki.local:B")))
                .with_child(Element::new(Tag::P).with_child(
                    Element::new(Tag::P).with_text("nested").with_child(link("http://c/")),
                )),
        );

        let refs = collect_references(&tree);
        let targets: Vec<String> = refs.iter().map(|r| r.target.to_string()).collect();
        assert_eq!(targets, vec!["wiki.local:A", "wiki.local:B", "http://c/"]);
        assert_eq!(refs[0].kind, RefKind::Transclusion);
        assert_eq!(refs[2].kind, RefKind::Link);
        assert_eq!(refs[2].path.indices(), &[0, 1, 0, 1]);
    }

    #[test]
    fn test_elements_without_href_are_ignored() {
        let tree = Element::new(Tag::Page)
            .with_child(Element::new(Tag::A).with_text("anchor only"))
            .with_child(Element::new(Tag::Other("span".into())).with_attr(attr::HREF, "wiki.local:X"));
        assert!(collect_references(&tree).is_empty());
    }

    #[test]
    fn test_missing_page_href_resolves_from_root() {
        let map = InterwikiMap::new("MyWiki", "/");
        let tree = Element::new(Tag::Page).with_child(link("wiki.local:/Child"));

        let (tree, refs) = LinkConverter::new(&map).convert(tree);
        assert_eq!(refs.links(), &[ItemName::from("Child")]);
        assert_eq!(tree.child_elements().next().unwrap().attr(attr::HREF), Some("/Child"));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let map = InterwikiMap::new("MyWiki", "/");
        let tree = Element::new(Tag::Page)
            .with_attr(attr::PAGE_HREF, "wiki:///Home")
            .with_child(link("wiki.local:Same"))
            .with_child(link("wiki:///Same#frag"))
            .with_child(link("http://x/"))
            .with_child(include("http://x/"));

        let (_, refs) = LinkConverter::new(&map).convert(tree);
        assert_eq!(refs.links(), &[ItemName::from("Same"), ItemName::from("Same")]);
        assert_eq!(refs.external_links(), &["http://x/".to_string(), "http://x/".to_string()]);
        assert!(refs.transclusions().is_empty());
    }
}
