// src/extract/email.rs
// =============================================================================
// Finds email addresses in page text.
//
// The pattern is deliberately narrow:
//   local part  [A-Za-z0-9._%+-]+   starting at a word boundary
//   host        [A-Za-z0-9.-]{0,6}  a short label
//   tld         [A-Za-z]{2,6}
// and the address must be followed by whitespace or a non-word character.
//
// The regex crate has no lookahead, so the trailing character is matched
// as part of the pattern and the next search resumes right after the
// address itself, not after that character.
// =============================================================================

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"\b([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]{0,6}\.[A-Za-z]{2,6})[\s\W]").unwrap()
    })
}

// Finds every address in `text`, optionally keeping only those that match
// `filter` (searched anywhere in the address, not anchored)
//
// Returns a sorted set, so an address repeated on a page appears once
pub fn find_emails(text: &str, filter: Option<&Regex>) -> BTreeSet<String> {
    let emails = match_emails(text);

    match filter {
        Some(filter) => filter_emails(emails, filter),
        None => emails,
    }
}

fn match_emails(text: &str) -> BTreeSet<String> {
    let pattern = email_pattern();
    let mut emails = BTreeSet::new();
    let mut start = 0;

    while let Some(captures) = pattern.captures_at(text, start) {
        let Some(address) = captures.get(1) else {
            break;
        };
        emails.insert(address.as_str().to_string());
        start = address.end();
    }

    emails
}

pub fn filter_emails(emails: BTreeSet<String>, filter: &Regex) -> BTreeSet<String> {
    emails
        .into_iter()
        .filter(|email| filter.is_match(email))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_double_at_is_rejected() {
        let emails = find_emails("contact a@b.co or bad@@nope", None);
        assert_eq!(emails, set(&["a@b.co"]));
    }

    #[test]
    fn test_duplicates_collapse() {
        let emails = find_emails("a@b.co, a@b.co; sales@acme.io\n", None);
        assert_eq!(emails, set(&["a@b.co", "sales@acme.io"]));
    }

    #[test]
    fn test_address_at_end_of_text_needs_trailing_char() {
        assert!(find_emails("write to a@b.co", None).is_empty());
        assert_eq!(find_emails("write to a@b.co.", None), set(&["a@b.co"]));
    }

    #[test]
    fn test_long_host_label_is_not_matched() {
        assert!(find_emails("mail x@example.com now", None).is_empty());
    }

    #[test]
    fn test_local_part_characters() {
        let emails = find_emails("<first.last+tag_1%x-y@ab.org>", None);
        assert_eq!(emails, set(&["first.last+tag_1%x-y@ab.org"]));
    }

    #[test]
    fn test_adjacent_addresses_both_found() {
        let emails = find_emails("a@b.co+c@d.io ", None);
        assert!(emails.contains("a@b.co"));
        assert!(emails.contains("+c@d.io"));
    }

    #[test]
    fn test_filter_keeps_matching_addresses() {
        let filter = Regex::new(r"@b\.co$").unwrap();
        let emails = filter_emails(set(&["a@b.co", "x@c.org"]), &filter);
        assert_eq!(emails, set(&["a@b.co"]));
    }

    #[test]
    fn test_find_with_filter() {
        let filter = Regex::new("^info").unwrap();
        let emails = find_emails("info@acme.io and bob@acme.io ", Some(&filter));
        assert_eq!(emails, set(&["info@acme.io"]));
    }
}
