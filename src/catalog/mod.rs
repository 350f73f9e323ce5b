//! Category hierarchy
//!
//! Categories arrive from the API as a flat list where each record may name a
//! parent. This module turns that list into a forest for tree views and
//! indented pickers.
//!
//! # Examples
//!
//! ```
//! use storedesk::catalog::{CategoryRecord, build_tree};
//!
//! let records = vec![
//!     CategoryRecord::new("1", "Men", None),
//!     CategoryRecord::new("2", "Shirts", Some("1")),
//!     CategoryRecord::new("3", "Orphan", Some("99")),
//! ];
//!
//! let roots = build_tree(&records);
//! assert_eq!(roots.len(), 2);
//! assert_eq!(roots[0].children[0].record.name, "Shirts");
//! assert_eq!(roots[1].record.name, "Orphan");
//! ```

pub mod tree;

pub use tree::{
    CategoryNode, CategoryRecord, Forest, build_forest, build_tree, build_tree_from_json, find,
    flatten,
};
