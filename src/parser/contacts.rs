use scraper::Html;

use super::fields::{element_text, ANCHORS};
use crate::model::Contacts;

const WEBSITE_HINTS: &[&str] = &["website", "blog", "personal"];

/// Classify every anchor on the page into the fixed personal-contact
/// slots. Links back to the platform itself are skipped. The last match
/// per category wins, overwriting earlier ones; that overwrite is the
/// intended policy, not an accident.
pub fn personal_contacts(doc: &Html, base_url: &str, self_hosts: &[String]) -> Contacts {
    let mut contacts = Contacts::default();
    for link in doc.select(&ANCHORS) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if self_hosts.iter().any(|host| href.contains(host.as_str())) {
            continue;
        }
        let text = element_text(&link).to_lowercase();

        if href.contains("mailto:") {
            contacts.email = href.replace("mailto:", "");
        } else if href.contains("linkedin.com/in/") {
            contacts.linkedin = href.to_string();
        } else if (href.contains("twitter.com") || href.contains("x.com"))
            && !href.contains("/mercury")
        {
            contacts.twitter = href.to_string();
        } else if href.starts_with("http")
            && !href.contains(base_url)
            && WEBSITE_HINTS.iter().any(|hint| text.contains(hint))
        {
            contacts.website = href.to_string();
        }
    }
    contacts
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrawlerConfig;

    fn classify(html: &str) -> Contacts {
        let config = CrawlerConfig::default();
        let doc = Html::parse_document(html);
        personal_contacts(&doc, &config.base_url, &config.self_hosts)
    }

    #[test]
    fn mailto_becomes_email() {
        let c = classify(r#"<a href="mailto:jane@x.com">Reach out</a>"#);
        assert_eq!(c.email, "jane@x.com");
    }

    #[test]
    fn later_mailto_overwrites_earlier() {
        let c = classify(
            r#"<a href="mailto:first@x.com">a</a><p></p><a href="mailto:second@x.com">b</a>"#,
        );
        assert_eq!(c.email, "second@x.com");
    }

    #[test]
    fn linkedin_profile_path_detected() {
        let c = classify(r#"<a href="https://linkedin.com/in/jane-doe">LinkedIn</a>"#);
        assert_eq!(c.linkedin, "https://linkedin.com/in/jane-doe");
        // Company pages are not personal profiles
        let c = classify(r#"<a href="https://linkedin.com/company/fund">LinkedIn</a>"#);
        assert!(c.linkedin.is_empty());
    }

    #[test]
    fn twitter_excludes_platform_handle() {
        let c = classify(r#"<a href="https://x.com/janedoe">Twitter</a>"#);
        assert_eq!(c.twitter, "https://x.com/janedoe");
        let c = classify(r#"<a href="https://twitter.com/mercury">Twitter</a>"#);
        assert!(c.twitter.is_empty());
    }

    #[test]
    fn website_requires_personal_hint_in_display_text() {
        let c = classify(r#"<a href="https://jane.example">My website</a>"#);
        assert_eq!(c.website, "https://jane.example");
        let c = classify(r#"<a href="https://jane.example">Some link</a>"#);
        assert!(c.website.is_empty());
    }

    #[test]
    fn platform_self_links_skipped() {
        let c = classify(
            r#"
            <a href="https://mercury.com/contact">website</a>
            <a href="https://twitter.com/mercuryhq">Twitter</a>
            <a href="https://app.mercury.example/login">blog</a>
        "#,
        );
        assert_eq!(c, Contacts::default());
    }
}
