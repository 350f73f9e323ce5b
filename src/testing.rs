//! Testing utilities for storedesk
//!
//! Fixture data shaped like the store API's list responses, plus a helper
//! for writing JSON input files into a temporary directory.
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::catalog::CategoryRecord;
use crate::records::{Customer, Order, extract_items};

/// Flat category list with a two-level hierarchy and one orphan
///
/// ```text
/// Men (m)
///   Shirts (m-s)
///   Ethnic (m-e)
///     Kurtas (m-e-k)
/// Women (w)
/// Accessories (acc)  parent "gone" does not exist
/// ```
#[must_use]
pub fn category_fixture() -> Vec<CategoryRecord> {
    vec![
        CategoryRecord::new("m-s", "Shirts", Some("m")),
        CategoryRecord::new("m", "Men", None),
        CategoryRecord::new("w", "Women", None),
        CategoryRecord::new("m-e", "Ethnic", Some("m")),
        CategoryRecord::new("m-e-k", "Kurtas", Some("m-e")),
        CategoryRecord::new("acc", "Accessories", Some("gone")),
    ]
}

/// Customer list response as returned by the API
#[must_use]
pub fn customers_body() -> Value {
    json!({
        "success": true,
        "customers": [
            { "_id": "c1", "name": "Zara Khan", "email": "zara@example.com", "country": "India",
              "createdAt": "2024-01-10T09:00:00Z" },
            { "_id": "c2", "name": "anil mehta", "email": "anil@example.com", "country": "India",
              "isBlocked": true, "createdAt": "2024-03-02T09:00:00Z" },
            { "_id": "c3", "name": "Mia Lopez", "email": "mia@example.es", "country": "Spain",
              "createdAt": "2023-12-24T09:00:00Z" },
            { "_id": "c4", "name": "Ben Okafor", "phone": 9876543210_u64, "country": "India" }
        ]
    })
}

#[must_use]
pub fn customers() -> Vec<Customer> {
    extract_items(&customers_body(), "customers")
}

/// Order list response as returned by the API
#[must_use]
pub fn orders_body() -> Value {
    json!({
        "data": [
            { "_id": "o1", "customerName": "Ravi", "email": "ravi@example.com", "total": 1200,
              "status": "delivered", "paymentMethod": "cod", "createdAt": "2024-02-01T10:00:00Z" },
            { "_id": "o2", "customerName": "Doe, Jane", "status": "pending",
              "items": [{ "name": "Scarf", "quantity": 2, "price": 250 }] }
        ]
    })
}

#[must_use]
pub fn orders() -> Vec<Order> {
    extract_items(&orders_body(), "orders")
}

/// Write `value` as JSON to `dir/name`
///
/// # Panics
/// Panics if the file cannot be written.
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, value.to_string()).expect("Failed to write fixture file");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_forest;
    use tempfile::TempDir;

    #[test]
    fn test_fixtures_deserialize() {
        assert_eq!(customers().len(), 4);
        assert_eq!(orders().len(), 2);
        assert_eq!(build_forest(&category_fixture()).node_count(), 6);
    }

    #[test]
    fn test_write_json() {
        let temp = TempDir::new().unwrap();
        let path = write_json(temp.path(), "customers.json", &customers_body());
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("zara@example.com"));
    }
}
