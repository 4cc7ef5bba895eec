//! Leaf feature collector for device-model pages
//!
//! A feature page is a flat sequence of heading blocks. Each `h3` names one
//! capability; its enclosing block carries the description paragraph, a
//! support-marker image, and a fixed-shape sub-feature list. The catalog
//! templates guarantee the positions, so extraction is positional and any
//! deviation is a template mismatch, not a transient fault.

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};

use crate::extract::{
    children_by_tag, normalize, parse_selector, raw_inner, ExtractError, ExtractResult,
};
use crate::records::{FeatureRecord, SubFeatureRecord};

const HEADING_SELECTOR: &str = "h3";

/// The exact accessibility text the catalog puts on a supported-feature
/// marker image. Any other value, or a missing image, means "not supported".
const SUPPORTED_MARKER: &str = "Function is supported";

/// Collects the ordered feature list from a device-model page
///
/// Output order equals heading document order and is never re-sorted.
///
/// # Errors
///
/// [`ExtractError`] when the heading/paragraph/list shape the templates
/// guarantee is absent.
pub fn collect_features(html: &str) -> ExtractResult<Vec<FeatureRecord>> {
    let document = Html::parse_document(html);
    let selector = parse_selector(HEADING_SELECTOR)?;

    let mut features = Vec::new();
    for heading in document.select(&selector) {
        features.push(feature_from_heading(heading)?);
    }

    if features.is_empty() {
        return Err(ExtractError::NoMatches {
            selector: HEADING_SELECTOR.to_string(),
        });
    }
    Ok(features)
}

/// Builds one feature record from its heading element
fn feature_from_heading(heading: ElementRef<'_>) -> ExtractResult<FeatureRecord> {
    let name = first_child_text(*heading, "heading")?;

    // The description is the first paragraph sibling inside the same block.
    let parent = heading.parent().ok_or(ExtractError::EmptyNode {
        context: "heading parent",
    })?;
    let description = children_by_tag(parent, "p")
        .next()
        .map(|p| normalize(&p.inner_html()))
        .ok_or_else(|| ExtractError::MissingDescription {
            heading: name.clone(),
        })?;

    let supported = marker_supported(*heading);

    // Sub-features live in the first list of the enclosing section.
    let section = parent.parent().ok_or(ExtractError::EmptyNode {
        context: "heading section",
    })?;
    let list = children_by_tag(section, "ul")
        .next()
        .ok_or_else(|| ExtractError::MissingFeatureList {
            heading: name.clone(),
        })?;

    let mut sub_features = Vec::new();
    for item in children_by_tag(*list, "li") {
        sub_features.push(sub_feature_from_item(item)?);
    }

    Ok(FeatureRecord {
        name,
        description,
        supported,
        sub_features,
    })
}

/// Builds one sub-feature record from a list item
///
/// The item's name is its first child node and the description its fourth,
/// a fixed positional offset in the catalog's list-item template.
fn sub_feature_from_item(item: ElementRef<'_>) -> ExtractResult<SubFeatureRecord> {
    let name = first_child_text(*item, "list item")?;

    let description = item
        .children()
        .nth(3)
        .and_then(raw_inner)
        .map(|raw| normalize(&raw))
        .ok_or_else(|| ExtractError::TruncatedListItem { item: name.clone() })?;

    Ok(SubFeatureRecord {
        name,
        description,
        supported: marker_supported(*item),
    })
}

/// Normalized markup of a node's first child
fn first_child_text(node: NodeRef<'_, Node>, context: &'static str) -> ExtractResult<String> {
    node.children()
        .next()
        .and_then(raw_inner)
        .map(|raw| normalize(&raw))
        .ok_or(ExtractError::EmptyNode { context })
}

/// True iff the node's first marker image carries the exact supported text
fn marker_supported(node: NodeRef<'_, Node>) -> bool {
    children_by_tag(node, "img")
        .next()
        .map(|img| img.value().attr("alt") == Some(SUPPORTED_MARKER))
        .unwrap_or(false)
}
