use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::fields::element_text;

static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static NAME_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [r#"[data-cy="investor-name"]"#, ".name"]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});

/// Ordered fallback chain, first non-empty wins: top-level heading,
/// name-specific selectors, any element mentioning "investor", and finally
/// the address's last path segment.
pub fn investor_name(doc: &Html, address: &str) -> String {
    select_text(doc, &H1)
        .or_else(|| NAME_SELECTORS.iter().find_map(|sel| select_text(doc, sel)))
        .or_else(|| text_by_content(doc, "investor"))
        .unwrap_or_else(|| name_from_address(address))
}

fn select_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
}

/// Full text of the parent of the first text node containing the keyword.
fn text_by_content(doc: &Html, keyword: &str) -> Option<String> {
    let needle = keyword.to_lowercase();
    let node = doc.tree.root().descendants().find(|n| {
        n.value()
            .as_text()
            .is_some_and(|t| t.to_lowercase().contains(&needle))
    })?;
    let parent = node.parent().and_then(ElementRef::wrap)?;
    let text = element_text(&parent);
    (!text.is_empty()).then_some(text)
}

/// Last path segment, hyphens as spaces, title-cased.
fn name_from_address(address: &str) -> String {
    let segment = address.rsplit('/').next().unwrap_or(address);
    segment
        .split('-')
        .filter(|part| !part.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "https://mercury.com/investor-database/jane-doe";

    #[test]
    fn top_level_heading_wins() {
        let doc = Html::parse_document("<h1>Jane Q. Doe</h1><div class=\"name\">Other</div>");
        assert_eq!(investor_name(&doc, ADDRESS), "Jane Q. Doe");
    }

    #[test]
    fn name_selector_fallback() {
        let doc = Html::parse_document(r#"<span data-cy="investor-name">Jane Doe</span>"#);
        assert_eq!(investor_name(&doc, ADDRESS), "Jane Doe");
    }

    #[test]
    fn keyword_fallback() {
        let doc = Html::parse_document("<div><p>Angel investor at Example Fund</p></div>");
        assert_eq!(investor_name(&doc, ADDRESS), "Angel investor at Example Fund");
    }

    #[test]
    fn address_slug_is_last_resort() {
        let doc = Html::parse_document("<html><body></body></html>");
        assert_eq!(investor_name(&doc, ADDRESS), "Jane Doe");
    }

    #[test]
    fn slug_is_title_cased() {
        assert_eq!(name_from_address("https://x.com/d/joão-DA-silva"), "João Da Silva");
    }
}
