//! Column key transliteration.
//!
//! Keys in the configuration document are derived from display names. The
//! mapping is deterministic but not injective ("Txn Date" and "txn  date"
//! share a key), so callers that need uniqueness must check for collisions.

use regex::Regex;
use std::sync::OnceLock;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn word_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w").expect("word-start pattern is valid"))
}

/// Converts a display name into a snake_case key.
///
/// Lowercases the name and collapses every whitespace run into one
/// underscore. Leading and trailing whitespace also become underscores.
///
/// # Examples
///
/// ```
/// use tablecrop::parser::keys::to_snake_case;
///
/// assert_eq!(to_snake_case("Transaction Date"), "transaction_date");
/// assert_eq!(to_snake_case("Amount   (RM)"), "amount_(rm)");
/// ```
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    whitespace_run()
        .replace_all(&name.to_lowercase(), "_")
        .into_owned()
}

/// Expands a snake_case key back into a title-cased display name.
///
/// Underscores become spaces and the first character of every word is
/// uppercased. Only names that were title case to begin with survive a
/// round trip.
///
/// # Examples
///
/// ```
/// use tablecrop::parser::keys::from_snake_case;
///
/// assert_eq!(from_snake_case("transaction_date"), "Transaction Date");
/// ```
#[must_use]
pub fn from_snake_case(key: &str) -> String {
    let spaced = key.replace('_', " ");
    word_start()
        .replace_all(&spaced, |caps: &regex::Captures<'_>| caps[0].to_uppercase())
        .into_owned()
}
