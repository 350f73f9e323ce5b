use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

use super::hints::{HintRule, apply_rules, builtin_rules};
use super::normalize::{is_publishable, normalize};
use crate::records::value_text;

/// Default cap on the number of tags kept
pub const DEFAULT_MAX_TAGS: usize = 20;
/// Shortest tag kept by generation
pub const DEFAULT_MIN_TAG_LEN: usize = 2;
/// Longest tag kept by generation
pub const DEFAULT_MAX_TAG_LEN: usize = 28;
/// Minimum trimmed length of title and category before generation runs
pub const MIN_INPUT_LEN: usize = 2;

const TITLE_TOKEN_LIMIT: usize = 10;
const BIGRAM_LIMIT: usize = 6;

static OUTSIDE_TOKEN_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("static pattern compiles"));

/// Split free text into lowercase keyword tokens
///
/// `&` reads as the word `and`; characters outside `[a-z0-9\s-]` are
/// dropped; single-character tokens are discarded.
///
/// # Examples
/// ```
/// # use storedesk::tags::tokenize;
/// assert_eq!(
///     tokenize("Men's T-Shirt & Shorts, 2 pc"),
///     ["mens", "t-shirt", "and", "shorts", "pc"]
/// );
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase().replace('&', " and ");
    OUTSIDE_TOKEN_CHARS
        .replace_all(&lowered, "")
        .split_whitespace()
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Why generation is not running yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitReason {
    TitleTooShort,
    CategoryTooShort,
    PlaceholderCategory,
}

impl fmt::Display for WaitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleTooShort => {
                write!(f, "waiting for a title of at least {MIN_INPUT_LEN} characters")
            }
            Self::CategoryTooShort => {
                write!(f, "waiting for a category of at least {MIN_INPUT_LEN} characters")
            }
            Self::PlaceholderCategory => write!(f, "waiting for a real category to be chosen"),
        }
    }
}

/// Whether title and category are good enough to generate from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    Waiting(WaitReason),
}

/// Outcome of [`TagGenerator::suggest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// Inputs not ready; the caller shows a waiting state
    Waiting(WaitReason),
    /// Existing tags merged with generated ones
    Ready(Vec<String>),
}

/// Tunables for tag generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSettings {
    /// Cap on tags kept after generation and merge
    pub max_tags: usize,
    /// Shortest generated tag
    pub min_len: usize,
    /// Longest generated tag
    pub max_len: usize,
    /// Category values that mean "nothing chosen yet"
    pub placeholder_categories: Vec<String>,
    /// Rules applied after the built-in hint table
    pub extra_hints: Vec<HintRule>,
}

impl Default for TagSettings {
    fn default() -> Self {
        Self {
            max_tags: DEFAULT_MAX_TAGS,
            min_len: DEFAULT_MIN_TAG_LEN,
            max_len: DEFAULT_MAX_TAG_LEN,
            placeholder_categories: vec!["cat".to_string()],
            extra_hints: Vec::new(),
        }
    }
}

/// Rule-based SEO tag generator
///
/// Generation is deterministic: the same title and category always give the
/// same tags in the same order.
///
/// # Examples
/// ```
/// use storedesk::tags::TagGenerator;
///
/// let generator = TagGenerator::default();
/// let tags = generator.generate("Winter Party Kurta", "Ethnic Wear");
/// assert!(tags.contains(&"winter wear".to_string()));
/// assert!(tags.contains(&"party wear".to_string()));
/// assert!(tags.contains(&"ethnic wear".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct TagGenerator {
    max_tags: usize,
    min_len: usize,
    max_len: usize,
    placeholders: Vec<String>,
    rules: Vec<HintRule>,
}

impl Default for TagGenerator {
    fn default() -> Self {
        Self::from_settings(&TagSettings::default())
    }
}

impl TagGenerator {
    /// Build a generator from settings, extending the built-in hint table
    #[must_use]
    pub fn from_settings(settings: &TagSettings) -> Self {
        let mut rules = builtin_rules();
        rules.extend(settings.extra_hints.iter().cloned());
        Self {
            max_tags: settings.max_tags,
            min_len: settings.min_len,
            max_len: settings.max_len,
            placeholders: settings
                .placeholder_categories
                .iter()
                .map(|p| p.trim().to_lowercase())
                .collect(),
            rules,
        }
    }

    /// Cap on the number of tags returned
    #[must_use]
    pub const fn max_tags(&self) -> usize {
        self.max_tags
    }

    /// Check the readiness gate
    #[must_use]
    pub fn readiness(&self, title: &str, category: &str) -> Readiness {
        let title = title.trim();
        let category = category.trim();

        if title.chars().count() < MIN_INPUT_LEN {
            Readiness::Waiting(WaitReason::TitleTooShort)
        } else if category.chars().count() < MIN_INPUT_LEN {
            Readiness::Waiting(WaitReason::CategoryTooShort)
        } else if self.placeholders.contains(&category.to_lowercase()) {
            Readiness::Waiting(WaitReason::PlaceholderCategory)
        } else {
            Readiness::Ready
        }
    }

    /// Derive tags from a title and category
    ///
    /// Candidates, in order: category tokens, the first title tokens, title
    /// bigrams, hint phrases, then `"{category} {title}"` and
    /// `"{category} {first title word}"`. The result is normalized, limited to
    /// publishable lengths, and capped. The readiness gate is not applied.
    #[must_use]
    pub fn generate(&self, title: &str, category: &str) -> Vec<String> {
        let title_tokens = tokenize(title);
        let category_tokens = tokenize(category);

        let mut candidates: Vec<String> = category_tokens.clone();
        candidates.extend(title_tokens.iter().take(TITLE_TOKEN_LIMIT).cloned());
        candidates.extend(
            title_tokens
                .windows(2)
                .take(BIGRAM_LIMIT)
                .map(|pair| format!("{} {}", pair[0], pair[1])),
        );

        let all_tokens: Vec<String> = category_tokens
            .into_iter()
            .chain(title_tokens.iter().cloned())
            .collect();
        candidates.extend(apply_rules(&self.rules, &all_tokens).into_iter().map(str::to_string));

        let category = category.trim();
        candidates.push(format!("{category} {}", title.trim()));
        if let Some(first) = title_tokens.first() {
            candidates.push(format!("{category} {first}"));
        }

        let tags: Vec<String> = normalize(candidates)
            .into_iter()
            .filter(|tag| is_publishable(tag, self.min_len, self.max_len))
            .take(self.max_tags)
            .collect();

        tracing::debug!(count = tags.len(), "generated tags");
        tags
    }

    /// Normalize a raw tag list (see [`normalize`])
    #[must_use]
    pub fn normalize<I, S>(&self, tags: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        normalize(tags)
    }

    /// Append generated tags to existing ones and cap the result
    ///
    /// Existing tags keep their order; only tags not already present (by slug)
    /// are appended.
    #[must_use]
    pub fn merge<A, B>(&self, existing: &[A], generated: &[B]) -> Vec<String>
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let combined = existing
            .iter()
            .map(AsRef::<str>::as_ref)
            .chain(generated.iter().map(AsRef::<str>::as_ref));
        let mut merged = normalize(combined);
        merged.truncate(self.max_tags);
        merged
    }

    /// Readiness gate, generation and merge in one step
    #[must_use]
    pub fn suggest<S: AsRef<str>>(
        &self,
        title: &str,
        category: &str,
        existing: &[S],
    ) -> Suggestion {
        match self.readiness(title, category) {
            Readiness::Waiting(reason) => {
                tracing::debug!(%reason, "tag generation not ready");
                Suggestion::Waiting(reason)
            }
            Readiness::Ready => {
                let generated = self.generate(title, category);
                Suggestion::Ready(self.merge(existing, &generated))
            }
        }
    }

    /// Suggest tags for a product or blog draft in API JSON form
    ///
    /// Reads `title` (or `name`) and `category`; a populated category object
    /// contributes its `name`. Existing tags come from `tags`, falling back to
    /// `hashtags`. Non-string values count as empty.
    #[must_use]
    pub fn suggest_for_draft(&self, draft: &Value) -> Suggestion {
        let title = text_field(draft, &["title", "name"]);
        let category = match draft.get("category") {
            Some(Value::Object(map)) => map.get("name").and_then(value_text).unwrap_or_default(),
            _ => text_field(draft, &["category"]),
        };

        let existing = ["tags", "hashtags"]
            .iter()
            .map(|key| string_list(draft.get(*key)))
            .find(|list| !list.is_empty())
            .unwrap_or_default();

        self.suggest(&title, &category, &existing)
    }
}

fn text_field(value: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
