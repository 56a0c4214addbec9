//! # wikiref-core
//!
//! Link layer of the wiki: resolves the link and transclusion targets of a
//! converted document tree and collects the items a page refers to.
//!
//! Also hosts the interwiki helpers, the data side of theming (breadcrumbs,
//! navibar, editor attribution) and the login backend chain.

pub mod auth;
pub mod config;
pub mod interwiki;
pub mod iri;
pub mod links;
pub mod models;
pub mod theme;

pub use config::Config;
pub use interwiki::{InterwikiCache, InterwikiMap};
pub use iri::Iri;
pub use links::{Category, ItemRefs, LinkConverter, LinkTarget, RefKind, ResolvedLink};
pub use models::{ItemStore, RevisionMeta, User, UserDirectory};
pub use theme::ThemeSupport;
