use chrono::{DateTime, Utc};
use heck::ToLowerCamelCase;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{AliasTable, ID_ALIASES, KeyAliases, Record, value_text, value_timestamp};

/// Accept RFC 3339 strings, bare dates, epoch millis or null
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_timestamp(&value))
}

/// Accept a string, a number, or null
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value).filter(|s| !s.is_empty()))
}

/// Accept an array of strings, a comma-separated string, or null
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items: Vec<String> = match &value {
        Value::Array(items) => items.iter().filter_map(value_text).collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        other => value_text(other).into_iter().collect(),
    };
    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

/// Number, or a numeric string such as `"1299.00"`
fn value_amount(value: &Value) -> Option<f64> {
    let amount: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    amount.filter(|a| a.is_finite())
}

/// Accept a number, a numeric string, or null
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_amount(&value))
}

/// Line item price; anything unreadable counts as zero
fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_amount(&value).unwrap_or_default())
}

/// Whole quantity from a number or string; anything unreadable counts as one
fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let quantity = match &value {
        Value::Number(n) => n.as_u64().and_then(|q| u32::try_from(q).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(quantity.unwrap_or_else(default_quantity))
}

/// Whole count from a number or string
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn active_label(active: bool) -> String {
    let label = if active { "active" } else { "inactive" };
    label.to_string()
}

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Store customer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
    /// Explicit account status from the API ("active" / "inactive")
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default)]
    pub is_blocked: Option<bool>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Whether the account is active
    ///
    /// An explicit `status` wins; otherwise the account is active unless
    /// `isBlocked` is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self.status.as_deref().map(str::to_lowercase).as_deref() {
            Some("active") => true,
            Some("inactive" | "blocked") => false,
            _ => !self.is_blocked.unwrap_or(false),
        }
    }
}

impl KeyAliases for Customer {
    const ALIASES: AliasTable = &[ID_ALIASES];
}

impl Record for Customer {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()).filter(|n| !n.is_empty()),
            "email" => self.email.clone(),
            "phone" => self.phone.clone(),
            "country" => self.country.clone(),
            "status" => Some(active_label(self.is_active())),
            "created_at" => self.created_at.map(|d| d.to_rfc3339()),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn default_search_fields(&self) -> &'static [&'static str] {
        &["name", "email", "phone", "id"]
    }
}

/// Blog post or draft
///
/// Older drafts store keywords under `hashtags` instead of `tags`; see
/// [`Blog::resolved_tags`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub hashtags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Blog {
    /// Tags for this post
    ///
    /// Resolution order: `tags` if non-empty, then `hashtags`, then nothing.
    #[must_use]
    pub fn resolved_tags(&self) -> &[String] {
        if self.tags.is_empty() {
            &self.hashtags
        } else {
            &self.tags
        }
    }
}

impl KeyAliases for Blog {
    const ALIASES: AliasTable = &[ID_ALIASES];
}

impl Record for Blog {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.clone()),
            "title" => Some(self.title.clone()).filter(|t| !t.is_empty()),
            "slug" => self.slug.clone(),
            "category" => self.category.clone(),
            "tags" => {
                let tags = self.resolved_tags();
                (!tags.is_empty()).then(|| tags.join(" "))
            }
            "status" => self.status.clone(),
            "created_at" => self.created_at.map(|d| d.to_rfc3339()),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn default_search_fields(&self) -> &'static [&'static str] {
        &["title", "slug", "category", "tags"]
    }
}

/// Line item inside an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_quantity", deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
}

const fn default_quantity() -> u32 {
    1
}

/// Customer order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "customer", deserialize_with = "lenient_text")]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, alias = "totalAmount", deserialize_with = "lenient_amount")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Order total, computed from line items when the API omits it
    #[must_use]
    pub fn total_amount(&self) -> Option<f64> {
        self.total.or_else(|| {
            (!self.items.is_empty()).then(|| {
                self.items
                    .iter()
                    .map(|item| item.price * f64::from(item.quantity))
                    .sum()
            })
        })
    }

    /// Total number of units across all line items
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

impl KeyAliases for Order {
    const ALIASES: AliasTable = &[
        ID_ALIASES,
        ("customerName", &["customer"]),
        ("total", &["totalAmount"]),
    ];
}

impl Record for Order {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.clone()),
            "customer" | "name" => self.customer_name.clone(),
            "email" => self.email.clone(),
            "phone" => self.phone.clone(),
            "total" => self.total_amount().map(money),
            "status" => self.status.clone(),
            "payment_method" => self.payment_method.clone(),
            "items" => Some(self.unit_count().to_string()),
            "created_at" | "date" => self.created_at.map(|d| d.to_rfc3339()),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn default_search_fields(&self) -> &'static [&'static str] {
        &["id", "customer", "email", "status"]
    }
}

/// Catalog product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "title")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub stock: Option<i64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl KeyAliases for Product {
    const ALIASES: AliasTable = &[ID_ALIASES, ("name", &["title"])];
}

impl Record for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()).filter(|n| !n.is_empty()),
            "sku" => self.sku.clone(),
            "category" => self.category.clone(),
            "price" => self.price.map(money),
            "stock" => self.stock.map(|s| s.to_string()),
            "tags" => (!self.tags.is_empty()).then(|| self.tags.join(" ")),
            "status" => Some(active_label(self.is_active.unwrap_or(true))),
            "created_at" => self.created_at.map(|d| d.to_rfc3339()),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn default_search_fields(&self) -> &'static [&'static str] {
        &["name", "sku", "category"]
    }
}

/// Discount coupon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub discount: Option<f64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl KeyAliases for Coupon {
    const ALIASES: AliasTable = &[ID_ALIASES];
}

impl Record for Coupon {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.clone()),
            "code" | "name" => Some(self.code.clone()).filter(|c| !c.is_empty()),
            "description" => self.description.clone(),
            "discount" => self.discount.map(|d| d.to_string()),
            "status" => Some(active_label(self.is_active.unwrap_or(true))),
            "expires_at" => self.expires_at.map(|d| d.to_rfc3339()),
            "created_at" => self.created_at.map(|d| d.to_rfc3339()),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn default_search_fields(&self) -> &'static [&'static str] {
        &["code", "description"]
    }
}

/// Untyped record for pages without a dedicated type
///
/// Field lookups try the name as given, then its camelCase form, so
/// `field("created_at")` finds a `createdAt` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Entity {
    id: String,
    fields: Map<String, Value>,
}

impl Entity {
    const DATE_FIELDS: [&'static str; 4] = ["date", "createdAt", "created_at", "updatedAt"];

    /// Raw JSON value of a field
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .get(name)
            .or_else(|| self.fields.get(&name.to_lower_camel_case()))
    }

    /// All fields of the record
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for Entity {
    fn from(fields: Map<String, Value>) -> Self {
        let id = ["id", "_id"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(value_text))
            .unwrap_or_default();
        Self { id, fields }
    }
}

impl From<Entity> for Map<String, Value> {
    fn from(entity: Entity) -> Self {
        entity.fields
    }
}

impl KeyAliases for Entity {
    const ALIASES: AliasTable = &[];
}

impl Record for Entity {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        self.get(name).and_then(value_text)
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Self::DATE_FIELDS
            .iter()
            .find_map(|key| self.fields.get(*key).and_then(value_timestamp))
    }

    fn default_search_fields(&self) -> &'static [&'static str] {
        &["id", "name", "title", "email"]
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
