//! Keyword → hint table for tag suggestions
//!
//! When any keyword of a rule appears among the title/category tokens, the
//! rule's hint phrases are suggested. Rules fire in table order.

use serde::{Deserialize, Serialize};

/// One keyword → hint association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintRule {
    /// Tokens that trigger the rule
    pub keywords: Vec<String>,
    /// Phrases suggested when the rule fires
    pub hints: Vec<String>,
}

impl HintRule {
    #[must_use]
    pub fn new(keywords: &[&str], hints: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            hints: hints.iter().map(|h| (*h).to_string()).collect(),
        }
    }

    /// Whether any keyword is among `tokens`
    #[must_use]
    pub fn matches(&self, tokens: &[String]) -> bool {
        self.keywords.iter().any(|k| tokens.contains(k))
    }
}

type StaticRule = (&'static [&'static str], &'static [&'static str]);

const BUILTIN: &[StaticRule] = &[
    (&["party", "evening", "cocktail"], &["party wear"]),
    (&["festive", "festival", "diwali", "eid"], &["festive wear"]),
    (&["wedding", "bridal", "bride"], &["wedding wear"]),
    (&["winter", "woolen", "woollen", "wool", "thermal"], &["winter wear"]),
    (&["summer"], &["summer wear"]),
    (&["kurta", "kurti", "kurtas", "kurtis", "lehenga", "sherwani"], &["ethnic wear"]),
    (&["saree", "sari", "sarees"], &["saree"]),
    (&["cotton"], &["cotton"]),
    (&["silk"], &["silk"]),
    (&["linen"], &["linen"]),
    (&["denim", "jeans"], &["denim"]),
    (&["casual"], &["casual wear"]),
    (&["formal", "office"], &["formal wear"]),
    (&["sports", "gym", "running", "yoga"], &["activewear"]),
    (&["men", "mens"], &["menswear"]),
    (&["women", "womens", "ladies"], &["womenswear"]),
    (&["kids", "boys", "girls"], &["kids wear"]),
    (&["handmade", "handcrafted", "handloom"], &["handmade"]),
    (&["organic"], &["organic"]),
    (&["gift", "gifts"], &["gift ideas"]),
];

/// The built-in rule table
#[must_use]
pub fn builtin_rules() -> Vec<HintRule> {
    BUILTIN
        .iter()
        .map(|(keywords, hints)| HintRule::new(keywords, hints))
        .collect()
}

/// Hints from every rule that fires for `tokens`, in rule order
#[must_use]
pub fn apply_rules<'a>(rules: &'a [HintRule], tokens: &[String]) -> Vec<&'a str> {
    rules
        .iter()
        .filter(|rule| rule.matches(tokens))
        .flat_map(|rule| rule.hints.iter().map(String::as_str))
        .collect()
}
