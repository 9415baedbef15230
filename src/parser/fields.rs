use std::sync::LazyLock;

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};

/// Marker class the site uses on section headings; a structural signal,
/// not a visual one.
static SECTION_HEADINGS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3.arcadia-heading-9").unwrap());
static ALL_H3: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());
pub(crate) static ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Concatenated text of an element, each text node trimmed.
pub fn element_text(el: &ElementRef) -> String {
    el.text().map(str::trim).collect::<String>().trim().to_string()
}

/// First element strictly after `start` in document order (its descendants,
/// then following siblings' subtrees, then ancestors' following siblings)
/// that satisfies `pred`.
fn first_following<'a>(
    start: NodeRef<'a, Node>,
    pred: impl Fn(&ElementRef<'a>) -> bool,
) -> Option<ElementRef<'a>> {
    for node in start.descendants().skip(1) {
        if let Some(el) = ElementRef::wrap(node) {
            if pred(&el) {
                return Some(el);
            }
        }
    }
    let mut anchor = Some(start);
    while let Some(node) = anchor {
        for sibling in node.next_siblings() {
            for desc in sibling.descendants() {
                if let Some(el) = ElementRef::wrap(desc) {
                    if pred(&el) {
                        return Some(el);
                    }
                }
            }
        }
        anchor = node.parent();
    }
    None
}

/// Text of the labeled section: scan marker-class headings for an exact
/// case-folded label match, take the heading's next sibling paragraph, or
/// fall back to a forward scan from the heading's parent. Sibling layout is
/// inferred, not guaranteed; identical headings resolve to the first that
/// yields content.
pub fn labeled_section(doc: &Html, label: &str) -> Option<String> {
    let want = label.trim().to_lowercase();
    for heading in doc.select(&SECTION_HEADINGS) {
        if element_text(&heading).to_lowercase() != want {
            continue;
        }
        if let Some(paragraph) = heading
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "p")
        {
            return Some(element_text(&paragraph));
        }
        // Sometimes the value lives outside the heading's wrapper.
        if let Some(parent) = heading.parent() {
            if let Some(paragraph) = first_following(parent, |el| el.value().name() == "p") {
                return Some(element_text(&paragraph));
            }
        }
    }
    None
}

/// Industries/Geography variant: descend into the next container after the
/// matching heading and collect the display text of every link whose target
/// carries the filter parameter, deduplicated by exact text in DOM order.
pub fn filter_links(doc: &Html, label: &str, param: &str) -> Vec<String> {
    let want = label.trim().to_lowercase();
    let mut items: Vec<String> = Vec::new();
    for heading in doc.select(&SECTION_HEADINGS) {
        if element_text(&heading).to_lowercase() != want {
            continue;
        }
        if let Some(container) = first_following(*heading, |el| el.value().name() == "div") {
            for link in container.select(&ANCHORS) {
                let Some(href) = link.value().attr("href") else {
                    continue;
                };
                if !href.contains(param) {
                    continue;
                }
                let text = element_text(&link);
                if !text.is_empty() && !items.contains(&text) {
                    items.push(text);
                }
            }
        }
        break;
    }
    items
}

/// Contact Links variant: the heading matches by case-insensitive substring,
/// and every contained link becomes a (display text, target) pair in
/// insertion order. Single-character display texts are noise; a repeated
/// label updates its earlier entry in place; mailto: prefixes are stripped.
pub fn contact_links(doc: &Html) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for heading in doc.select(&SECTION_HEADINGS) {
        if !element_text(&heading).to_lowercase().contains("contact links") {
            continue;
        }
        if let Some(container) = first_following(*heading, |el| el.value().name() == "div") {
            for link in container.select(&ANCHORS) {
                let Some(href) = link.value().attr("href") else {
                    continue;
                };
                let text = element_text(&link);
                if text.chars().count() < 2 {
                    continue;
                }
                let target = href.replace("mailto:", "");
                match pairs.iter_mut().find(|(key, _)| *key == text) {
                    Some(entry) => entry.1 = target,
                    None => pairs.push((text, target)),
                }
            }
        }
        break;
    }
    pairs
}

/// Fallback bio lookup: the first h3 mentioning "bio" (any class), then the
/// first following paragraph or div.
pub fn bio_fallback(doc: &Html) -> Option<String> {
    let heading = doc
        .select(&ALL_H3)
        .find(|h| element_text(h).to_lowercase().contains("bio"))?;
    let content = first_following(*heading, |el| {
        matches!(el.value().name(), "p" | "div")
    })?;
    Some(element_text(&content))
}

// ── Tests ──
