//! SEO tag suggestions for product drafts
//!
//! Tags are derived from a product's title and category: keyword tokens,
//! title bigrams, hint phrases from a keyword table, and two composite
//! phrases. Every tag is a lowercase slug, unique, and capped in count.
//!
//! # Examples
//!
//! ```
//! use storedesk::tags::{Suggestion, TagGenerator, WaitReason};
//!
//! let generator = TagGenerator::default();
//!
//! // A placeholder category keeps the generator waiting
//! assert_eq!(
//!     generator.suggest::<&str>("Silk Saree", "cat", &[]),
//!     Suggestion::Waiting(WaitReason::PlaceholderCategory)
//! );
//!
//! // Existing tags come first, generated tags fill the rest
//! let Suggestion::Ready(tags) = generator.suggest("Silk Saree", "Sarees", &["Bridal Pick"]) else {
//!     panic!("inputs are ready");
//! };
//! assert_eq!(tags[0], "bridal pick");
//! assert!(tags.contains(&"silk".to_string()));
//! ```

pub mod generator;
pub mod hints;
pub mod normalize;

pub use generator::{
    DEFAULT_MAX_TAG_LEN, DEFAULT_MAX_TAGS, DEFAULT_MIN_TAG_LEN, MIN_INPUT_LEN, Readiness,
    Suggestion, TagGenerator, TagSettings, WaitReason, tokenize,
};
pub use hints::{HintRule, apply_rules, builtin_rules};
pub use normalize::{is_numeric, is_publishable, normalize, slugify};
