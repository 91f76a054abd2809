//! Keyword list entry parsing.
//!
//! Users type keywords as one comma- or newline-separated string, or supply a
//! column of them. These helpers turn that into the ordered list
//! [`MetricsEngine::compute`](crate::MetricsEngine::compute) expects: trimmed,
//! non-empty, first spelling kept, case-insensitive duplicates dropped.
//!
//! The engine itself never parses delimited strings and processes duplicate
//! keywords separately.

use rustc_hash::FxHashSet;

/// Splits a comma/newline separated keyword entry.
///
/// ```
/// use mention_core::parse_keyword_list;
///
/// let keywords = parse_keyword_list("cpi, FOMC\nrate hike,, fomc ");
/// assert_eq!(keywords, ["cpi", "FOMC", "rate hike"]);
/// ```
pub fn parse_keyword_list(raw: &str) -> Vec<String> {
    let mut keywords = Vec::new();
    merge_keyword_lists(&mut keywords, raw.split([',', '\n']));
    keywords
}

/// Appends `more` to `keywords`, skipping blanks and case-insensitive
/// duplicates of anything already present.
pub fn merge_keyword_lists<I, S>(keywords: &mut Vec<String>, more: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: FxHashSet<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    for keyword in more {
        let keyword = keyword.as_ref().trim();
        if keyword.is_empty() {
            continue;
        }
        if seen.insert(keyword.to_lowercase()) {
            keywords.push(keyword.to_owned());
        }
    }
}
