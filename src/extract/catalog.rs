//! Node extractor for catalog navigation pages
//!
//! Catalog pages embed sibling-selection widgets: either captioned tiles
//! (`span.caption` inside a clickable container) or plain anchor lists.
//! Navigation is not carried in `href` attributes; each widget carries a
//! script-based click handler whose first single-quoted string literal is
//! the relative URL of the child page.

use scraper::{ElementRef, Html};

use crate::extract::{normalize, parse_selector, ExtractError, ExtractResult};

const CAPTION_SELECTOR: &str = "span.caption";
const ANCHOR_SELECTOR: &str = "a";

/// An owned handle to one child entry discovered on a navigation page
///
/// Created and discarded per page visit; never cached across traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogChild {
    /// Normalized display text of the entry
    pub label: String,

    /// Relative navigation URL fragment, appended verbatim to the catalog root
    pub target: String,
}

/// Extracts captioned child entries in document order
///
/// The caption span itself only carries the label; the click handler lives
/// on the span's grandparent container, matching the catalog's tile markup.
///
/// # Errors
///
/// * [`ExtractError::NoMatches`] - no caption node on a page expected to
///   have children (crawl-structure violation, not a transient fault)
/// * [`ExtractError::MissingNavigation`] - a matched node whose container
///   carries no click handler
pub fn caption_children(html: &str) -> ExtractResult<Vec<CatalogChild>> {
    let document = Html::parse_document(html);
    let selector = parse_selector(CAPTION_SELECTOR)?;

    let mut children = Vec::new();
    for node in document.select(&selector) {
        let label = normalize(&node.inner_html());
        let container = node
            .parent()
            .and_then(|p| p.parent())
            .and_then(ElementRef::wrap);
        let target = navigation_target(container, &label)?;
        children.push(CatalogChild { label, target });
    }

    if children.is_empty() {
        return Err(ExtractError::NoMatches {
            selector: CAPTION_SELECTOR.to_string(),
        });
    }
    Ok(children)
}

/// Extracts anchor child entries in document order
///
/// Pages without caption markup (year listings, device listings) link their
/// children through plain anchors; the click handler sits on the anchor
/// itself.
///
/// # Errors
///
/// Same as [`caption_children`].
pub fn anchor_children(html: &str) -> ExtractResult<Vec<CatalogChild>> {
    let document = Html::parse_document(html);
    let selector = parse_selector(ANCHOR_SELECTOR)?;

    let mut children = Vec::new();
    for node in document.select(&selector) {
        let label = normalize(&node.inner_html());
        let target = navigation_target(Some(node), &label)?;
        children.push(CatalogChild { label, target });
    }

    if children.is_empty() {
        return Err(ExtractError::NoMatches {
            selector: ANCHOR_SELECTOR.to_string(),
        });
    }
    Ok(children)
}

/// Child entries of the catalog root: one per car model
pub fn model_entries(html: &str) -> ExtractResult<Vec<CatalogChild>> {
    caption_children(html)
}

/// Child entries of a model page: one per model year (anchor markup only)
pub fn year_entries(html: &str) -> ExtractResult<Vec<CatalogChild>> {
    anchor_children(html)
}

/// Child entries of a model-year page: one per trim/equipment
pub fn equipment_entries(html: &str) -> ExtractResult<Vec<CatalogChild>> {
    caption_children(html)
}

/// Child entries of an equipment page: one per device manufacturer
pub fn manufacturer_entries(html: &str) -> ExtractResult<Vec<CatalogChild>> {
    caption_children(html)
}

/// Child entries of a manufacturer page: one per device model (anchor markup)
pub fn device_entries(html: &str) -> ExtractResult<Vec<CatalogChild>> {
    anchor_children(html)
}

/// Pulls the navigation fragment out of an element's click handler
///
/// Takes the first single-quoted string literal of the `onclick` value and
/// decodes the `&amp;` entity; the fragment is otherwise used verbatim.
fn navigation_target(element: Option<ElementRef<'_>>, label: &str) -> ExtractResult<String> {
    element
        .and_then(|el| el.value().attr("onclick"))
        .and_then(first_quoted_literal)
        .map(|fragment| fragment.replace("&amp;", "&"))
        .ok_or_else(|| ExtractError::MissingNavigation {
            label: label.to_string(),
        })
}

/// Returns the text between the first and second single quote, if any
fn first_quoted_literal(handler: &str) -> Option<&str> {
    let mut parts = handler.split('\'');
    parts.next();
    parts.next()
}
