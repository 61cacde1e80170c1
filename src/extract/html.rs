// src/extract/html.rs
// =============================================================================
// This module turns a fetched HTML page into the two things the crawler
// needs: the page's plain text and the links it points to.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Never fails on bad markup (html5ever recovers like a browser does)
//
// We also use the `url` crate to resolve relative links against the page.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

// What the crawler keeps from one parsed page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// Every text node in the document, concatenated in document order
    pub text: String,
    /// Absolute http(s) links in document order (duplicates kept)
    pub links: Vec<Url>,
}

// Parses an HTML document fetched from `page_url`
//
// Example:
//   html = "<p>Hi</p><a href='/docs'>Docs</a>"
//   page_url = "https://example.com/"
//   text = "HiDocs", links = ["https://example.com/docs"]
pub fn parse_page(html: &str, page_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    let text = document.root_element().text().collect::<String>();
    let links = extract_links(&document, page_url);

    ParsedPage { text, links }
}

fn extract_links(document: &Html, base: &Url) -> Vec<Url> {
    // Our selector is a constant and known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(base, href))
        .filter(is_crawlable_link)
        .collect()
}

// Resolves a (possibly relative) href against the page it was found on
//
// Returns None for:
//   - same-page anchors ("#section"), which point back at the page itself
//   - hrefs the url crate can't make sense of
//
// The fragment is stripped from every other link, so "/page#a" and
// "/page#b" are the same page to the visited set
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let mut url = base.join(href).ok()?;
    url.set_fragment(None);
    Some(url)
}

// Only http and https links are ever fetched; mailto:, tel:, javascript:,
// data: and friends are dropped here
fn is_crawlable_link(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/page/").unwrap()
    }

    #[test]
    fn test_extract_absolute_link() {
        let page = parse_page(r#"<a href="https://www.rust-lang.org">Rust</a>"#, &base());
        assert_eq!(page.links, vec![Url::parse("https://www.rust-lang.org/").unwrap()]);
    }

    #[test]
    fn test_resolve_relative_links() {
        let html = r#"
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
            <a href="team.html">Team</a>
        "#;
        let page = parse_page(html, &base());
        let links: Vec<String> = page.links.iter().map(Url::to_string).collect();
        assert_eq!(
            links,
            vec![
                "https://example.com/docs",
                "https://example.com/about",
                "https://example.com/page/team.html",
            ]
        );
    }

    #[test]
    fn test_skip_mailto_and_anchor() {
        let html = r##"
            <a href="mailto:test@example.com">Email</a>
            <a href="#top">Top</a>
            <a href="javascript:void(0)">Nothing</a>
            <a>No href</a>
        "##;
        let page = parse_page(html, &base());
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_fragments_are_stripped_from_links() {
        let html = r##"
            <a href="/page#a">A</a>
            <a href="/page#b">B</a>
            <a href="https://example.com/#top">Home</a>
        "##;
        let page = parse_page(html, &base());
        let links: Vec<String> = page.links.iter().map(Url::to_string).collect();
        assert_eq!(
            links,
            vec![
                "https://example.com/page",
                "https://example.com/page",
                "https://example.com/",
            ]
        );
    }

    #[test]
    fn test_links_keep_document_order_and_duplicates() {
        let html = r#"<a href="/b">B</a><a href="/a">A</a><a href="/b">B again</a>"#;
        let page = parse_page(html, &base());
        let paths: Vec<&str> = page.links.iter().map(Url::path).collect();
        assert_eq!(paths, vec!["/b", "/a", "/b"]);
    }

    #[test]
    fn test_text_collects_all_text_nodes() {
        let html = "<html><body><h1>Contact</h1>\n<p>Write to <b>a@b.co</b> today</p></body></html>";
        let page = parse_page(html, &base());
        assert!(page.text.contains("Contact"));
        assert!(page.text.contains("Write to a@b.co today"));
    }

    #[test]
    fn test_broken_markup_still_parses() {
        let page = parse_page("<p>unclosed <a href='/x'>link", &base());
        assert!(page.text.contains("unclosed link"));
        assert_eq!(page.links.len(), 1);
    }
}
