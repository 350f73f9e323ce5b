//! Slug normalization for tags
//!
//! A slug is lowercase ASCII words separated by single spaces, e.g.
//! `"party wear"`. Normalization is idempotent.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static NON_ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static pattern compiles"));

/// Slugify one tag
///
/// Trims, lowercases, spells `&` as `and`, and collapses every run of
/// non-alphanumeric characters into a single space.
///
/// # Examples
/// ```
/// # use storedesk::tags::slugify;
/// assert_eq!(slugify("  Salwar & Kameez!! "), "salwar and kameez");
/// assert_eq!(slugify("T-Shirt"), "t shirt");
/// assert_eq!(slugify("***"), "");
/// ```
#[must_use]
pub fn slugify(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase().replace('&', " and ");
    NON_ALNUM_RUN
        .replace_all(&lowered, " ")
        .trim()
        .to_string()
}

/// Slugify every tag, drop empties, and remove duplicates keeping the first
#[must_use]
pub fn normalize<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|tag| slugify(tag.as_ref()))
        .filter(|slug| !slug.is_empty())
        .filter(|slug| seen.insert(slug.clone()))
        .collect()
}

/// Whether a slug is only digits (and the spaces between them)
#[must_use]
pub fn is_numeric(slug: &str) -> bool {
    !slug.is_empty() && slug.chars().all(|c| c.is_ascii_digit() || c == ' ')
}

/// Whether a slug is fit to publish: length within bounds and not a number
#[must_use]
pub fn is_publishable(slug: &str, min_len: usize, max_len: usize) -> bool {
    let len = slug.chars().count();
    (min_len..=max_len).contains(&len) && !is_numeric(slug)
}
