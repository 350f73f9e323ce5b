//! List views: search, field filters, sorting and pagination
//!
//! The pipeline is pure. A page hands in the full source list plus a
//! [`ListQuery`] and gets back an ordered view; pagination slices that view.
//!
//! # Examples
//!
//! ```
//! use storedesk::listing::{ListQuery, SortKey, ListView};
//! use storedesk::records::Customer;
//! use serde_json::json;
//!
//! let customers: Vec<Customer> = serde_json::from_value(json!([
//!     { "_id": "1", "name": "Zara", "country": "India" },
//!     { "_id": "2", "name": "Anil", "country": "India" },
//!     { "_id": "3", "name": "Mia", "country": "Spain" },
//! ])).unwrap();
//!
//! let query = ListQuery::new()
//!     .with_filter("country", "India")
//!     .with_sort(SortKey::NameAsc);
//! let page = ListView::new(&customers, query).page(1, 10);
//!
//! let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
//! assert_eq!(names, ["Anil", "Zara"]);
//! ```

pub mod criteria;
pub mod page;
pub mod pipeline;

pub use criteria::{ListQuery, SortKey};
pub use page::{Page, clamp_page, page_slice, paginate, total_pages};
pub use pipeline::{ListView, compare, matches_filters, matches_query, process};
