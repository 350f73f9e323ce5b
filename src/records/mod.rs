//! Entity records fetched from the store API
//!
//! The API hands back loosely shaped JSON. This module gives each page a typed
//! record with explicitly optional fields, plus an opaque [`Entity`] for pages
//! that only need a handful of named fields.
//!
//! Every record implements [`Record`], the only view the list pipeline and the
//! exporter have of an item:
//!
//! - `id()`: the unique identifier (`id` or Mongo-style `_id`)
//! - `field(name)`: a named field rendered as text, `None` when absent
//! - `timestamp()`: the date used by date sorts
//!
//! The API is not consistent about key names: Mongo documents serialized with
//! virtuals carry both `_id` and `id`, some endpoints send `totalAmount` for
//! `total`. Each wire type lists its alternate spellings through
//! [`KeyAliases`], and [`extract_items`] folds them into one key before
//! deserializing.
//!
//! # Examples
//!
//! ```
//! use storedesk::records::{Customer, Record, extract_items};
//! use serde_json::json;
//!
//! let body = json!({ "data": [{ "_id": "c1", "name": "Asha", "email": "asha@example.com" }] });
//! let customers: Vec<Customer> = extract_items(&body, "customers");
//! assert_eq!(customers[0].id(), "c1");
//! assert_eq!(customers[0].field("email").as_deref(), Some("asha@example.com"));
//! ```

pub mod types;

pub use types::{Blog, Coupon, Customer, Entity, Order, OrderItem, Product};

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Read-only view of an entity used by filtering, sorting and export
pub trait Record {
    /// Unique identifier of the record
    fn id(&self) -> &str;

    /// Named field rendered as text
    ///
    /// Returns `None` when the record has no value for `name`. Implementations
    /// may expose derived fields (e.g. `status` computed from a blocked flag).
    fn field(&self, name: &str) -> Option<String>;

    /// Timestamp used by date sorts
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Fields searched by free-text queries when the caller names none
    fn default_search_fields(&self) -> &'static [&'static str] {
        &["id"]
    }
}

/// `(key, alternates)` pairs using wire names
pub type AliasTable = &'static [(&'static str, &'static [&'static str])];

/// Alternate key spellings accepted by a wire type
pub trait KeyAliases {
    /// When a key holds a non-null value its alternates are dropped;
    /// otherwise the first alternate present takes its place.
    const ALIASES: AliasTable;
}

/// The `id`/`_id` pair shared by every API document
pub const ID_ALIASES: (&str, &[&str]) = ("id", &["_id"]);

/// Fold the alternate keys of `T` into their canonical key
///
/// Non-object values are returned unchanged.
#[must_use]
pub fn unalias<T: KeyAliases>(item: &Value) -> Value {
    let mut item = item.clone();
    if let Value::Object(map) = &mut item {
        for (key, alternates) in T::ALIASES {
            let mut present = map.get(*key).is_some_and(|v| !v.is_null());
            for alternate in *alternates {
                let Some(value) = map.remove(*alternate) else {
                    continue;
                };
                if !present && !value.is_null() {
                    map.insert((*key).to_string(), value);
                    present = true;
                }
            }
        }
    }
    item
}

/// Pull the item array out of an API list response
///
/// Accepts a bare array, or an object carrying the array under `data`,
/// `items`, or `key` (e.g. `"customers"`). Alternate key spellings are folded
/// per [`KeyAliases`]. Elements that do not deserialize as `T` are skipped;
/// anything else yields an empty list.
#[must_use]
pub fn extract_items<T: DeserializeOwned + KeyAliases>(body: &Value, key: &str) -> Vec<T> {
    let Some(array) = list_array(body, key) else {
        return Vec::new();
    };

    let mut skipped = 0usize;
    let items: Vec<T> = array
        .iter()
        .filter_map(|item| match serde_json::from_value(unalias::<T>(item)) {
            Ok(record) => Some(record),
            Err(e) => {
                skipped += 1;
                tracing::debug!(error = %e, "skipping malformed {key} record");
                None
            }
        })
        .collect();

    if skipped > 0 {
        tracing::warn!(skipped, kept = items.len(), "dropped malformed {key} records");
    }
    items
}

fn list_array<'a>(body: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(map) => [key, "data", "items"]
            .iter()
            .find_map(|k| map.get(*k))
            .and_then(|inner| list_array(inner, key)),
        _ => None,
    }
}

/// Render a JSON value as display text
///
/// Strings pass through, numbers and booleans are formatted, arrays are
/// space-joined. `null` and objects have no text form.
#[must_use]
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_text).collect();
            Some(parts.join(" "))
        }
    }
}

/// Interpret a JSON value as a point in time
///
/// Numbers are epoch milliseconds. Strings may be RFC 3339 or a bare
/// `YYYY-MM-DD` date (midnight UTC).
#[must_use]
pub fn value_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::String(s) => parse_timestamp(s),
        _ => None,
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_items_bare_array() {
        let body = json!([{ "id": "1" }, { "id": "2" }]);
        let items: Vec<Entity> = extract_items(&body, "entities");
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_extract_items_wrapped() {
        let body = json!({ "success": true, "blogs": [{ "_id": "b1", "title": "Hello" }] });
        let items: Vec<Blog> = extract_items(&body, "blogs");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), "b1");
    }

    #[test]
    fn test_extract_items_nested_data() {
        let body = json!({ "data": { "orders": [{ "_id": "o1" }] } });
        let items: Vec<Order> = extract_items(&body, "orders");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_extract_items_malformed_input() {
        let items: Vec<Entity> = extract_items(&json!("not a list"), "entities");
        assert!(items.is_empty());

        let items: Vec<Entity> = extract_items(&json!({ "count": 3 }), "entities");
        assert!(items.is_empty());
    }

    #[test]
    fn test_extract_items_skips_bad_elements() {
        let body = json!([{ "_id": "c1", "name": "Ok" }, 42, { "name": "no id" }]);
        let items: Vec<Customer> = extract_items(&body, "customers");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_extract_items_with_both_id_keys() {
        let body = json!([
            { "_id": "c1", "id": "c1", "name": "Asha" },
            { "_id": "c2", "id": null, "name": "Ben" }
        ]);
        let items: Vec<Customer> = extract_items(&body, "customers");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id(), "c1");
        assert_eq!(items[1].id(), "c2");
    }

    #[test]
    fn test_extract_items_with_both_total_keys() {
        let body = json!([{ "_id": "o1", "total": 500, "totalAmount": 450 }]);
        let items: Vec<Order> = extract_items(&body, "orders");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].total, Some(500.0));
    }

    #[test]
    fn test_unalias_keeps_entity_fields() {
        let item = json!({ "_id": "e1", "id": "e1" });
        assert_eq!(unalias::<Entity>(&item), item);
        assert_eq!(unalias::<Customer>(&json!(3)), json!(3));
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("a")), Some("a".to_string()));
        assert_eq!(value_text(&json!(3)), Some("3".to_string()));
        assert_eq!(value_text(&json!(true)), Some("true".to_string()));
        assert_eq!(value_text(&json!(["x", "y"])), Some("x y".to_string()));
        assert_eq!(value_text(&json!(null)), None);
        assert_eq!(value_text(&json!({ "a": 1 })), None);
    }

    #[test]
    fn test_value_timestamp() {
        let ms = value_timestamp(&json!(1_700_000_000_000_i64)).unwrap();
        assert_eq!(ms.timestamp(), 1_700_000_000);

        let rfc = value_timestamp(&json!("2024-03-01T10:00:00Z")).unwrap();
        let day = value_timestamp(&json!("2024-03-01")).unwrap();
        assert!(rfc > day);

        assert!(value_timestamp(&json!("yesterday")).is_none());
        assert!(value_timestamp(&json!(null)).is_none());
    }
}
