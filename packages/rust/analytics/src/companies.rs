//! Company Extractor: the distinct organization names in the author column.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use channelscope_shared::{ChannelRecord, NO_INFORMATION};

/// A token is a personal name when it is exactly two capitalized words
/// (Latin or Cyrillic alphabet, remainder lowercase).
fn personal_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-ZА-ЯЁ][a-zа-яё]+\s[A-ZА-ЯЁ][a-zа-яё]+$").expect("valid regex")
    })
}

/// Whether an author token looks like a first-name last-name identity.
pub fn is_personal_name(token: &str) -> bool {
    personal_name_pattern().is_match(token)
}

/// Split an author cell into trimmed tokens.
pub fn split_authors(author: &str) -> impl Iterator<Item = &str> {
    author.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Collect the sorted, deduplicated set of organization names appearing in
/// the author column of `rows`.
///
/// Any token shaped like a personal name is excluded, even when it is in
/// fact an organization ("Яндекс Практикум" style names are lost). That is
/// an accepted heuristic of the dataset, not something to disambiguate here.
pub fn extract_companies(rows: &[ChannelRecord]) -> Vec<String> {
    let mut companies = BTreeSet::new();

    for row in rows {
        if row.author.is_empty() {
            continue;
        }
        for token in split_authors(&row.author) {
            if !is_personal_name(token) && token != NO_INFORMATION {
                companies.insert(token.to_string());
            }
        }
    }

    companies.into_iter().collect()
}
