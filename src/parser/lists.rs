use std::sync::LazyLock;

use regex::Regex;

static DELIMITERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,;•·\n]").unwrap());

/// Split raw section text on commas, semicolons, bullet glyphs and
/// newlines; trim each piece and drop empty or single-character pieces,
/// preserving split order.
pub fn parse_list(text: &str) -> Vec<String> {
    DELIMITERS
        .split(text)
        .map(str::trim)
        .filter(|piece| piece.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_mixed_delimiters() {
        assert_eq!(
            parse_list("Seed, Series A; Series B"),
            vec!["Seed", "Series A", "Series B"]
        );
    }

    #[test]
    fn splits_on_bullets_and_newlines() {
        assert_eq!(
            parse_list("Fintech • SaaS · Climate\nConsumer"),
            vec!["Fintech", "SaaS", "Climate", "Consumer"]
        );
    }

    #[test]
    fn drops_empty_and_single_character_pieces() {
        assert_eq!(parse_list("Seed,, a ,Series A"), vec!["Seed", "Series A"]);
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ; ").is_empty());
    }

    #[test]
    fn idempotent_on_clean_input() {
        let parsed = parse_list("Seed, Series A; Series B");
        let rejoined = parsed.join(", ");
        assert_eq!(parse_list(&rejoined), parsed);
    }
}
