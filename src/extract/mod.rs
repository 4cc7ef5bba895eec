//! Typed extraction functions over parsed catalog pages
//!
//! Every page shape the crawler visits has a named extraction function
//! returning owned data, so the parsed document never outlives a single
//! synchronous call (and never crosses an await point):
//! - navigation pages: caption widgets and plain anchor listings
//! - device feature pages: the leaf feature collector

mod catalog;
mod features;

pub use catalog::{
    anchor_children, caption_children, device_entries, equipment_entries, manufacturer_entries,
    model_entries, year_entries, CatalogChild,
};
pub use features::collect_features;

use ego_tree::NodeRef;
use scraper::{ElementRef, Node, Selector};
use thiserror::Error;

/// Errors raised when a page does not match the markup shape the catalog
/// templates guarantee. These indicate a template mismatch, not a transient
/// fault; nothing here is retried.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector `{css}`: {message}")]
    Selector { css: String, message: String },

    #[error("No nodes matched `{selector}` on a page expected to have children")]
    NoMatches { selector: String },

    #[error("Node `{label}` has no click-navigation attribute")]
    MissingNavigation { label: String },

    #[error("Empty {context} node")]
    EmptyNode { context: &'static str },

    #[error("No description paragraph for heading `{heading}`")]
    MissingDescription { heading: String },

    #[error("No sub-feature list for heading `{heading}`")]
    MissingFeatureList { heading: String },

    #[error("List item `{item}` has fewer child nodes than the template requires")]
    TruncatedListItem { item: String },
}

/// Result type alias for extraction operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Parses a CSS selector, surfacing failures as typed errors
pub(crate) fn parse_selector(css: &str) -> ExtractResult<Selector> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        css: css.to_string(),
        message: e.to_string(),
    })
}

/// Normalizes a display label: strips leading/trailing spaces and literal
/// CR/LF characters. Entities inside the text are left encoded.
pub(crate) fn normalize(raw: &str) -> String {
    raw.trim_matches(|c| c == ' ' || c == '\r' || c == '\n')
        .to_string()
}

/// Returns the raw inner markup of an arbitrary node: the text of a text
/// node, or the inner HTML of an element.
pub(crate) fn raw_inner(node: NodeRef<'_, Node>) -> Option<String> {
    if let Some(text) = node.value().as_text() {
        return Some(text.to_string());
    }
    ElementRef::wrap(node).map(|el| el.inner_html())
}

/// Iterates the element children of a node carrying the given tag name
pub(crate) fn children_by_tag<'a>(
    node: NodeRef<'a, Node>,
    tag: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    node.children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == tag)
}
