//! Column specifications for tabular exports

use crate::records::{Order, Record};

type Accessor<T> = Box<dyn Fn(&T) -> Option<String>>;

/// One export column: a header label and a value accessor
///
/// The accessor returns `None` for a missing value, which renders as an
/// empty cell.
pub struct Column<T> {
    header: String,
    accessor: Accessor<T>,
}

impl<T> Column<T> {
    pub fn new(
        header: impl Into<String>,
        accessor: impl Fn(&T) -> Option<String> + 'static,
    ) -> Self {
        Self {
            header: header.into(),
            accessor: Box::new(accessor),
        }
    }

    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Cell text for `row`, empty when the value is missing
    #[must_use]
    pub fn cell(&self, row: &T) -> String {
        (self.accessor)(row).unwrap_or_default()
    }
}

impl<T: Record + 'static> Column<T> {
    /// Column reading the named [`Record::field`]
    pub fn field(header: impl Into<String>, name: &str) -> Self {
        let name = name.to_string();
        Self::new(header, move |row: &T| row.field(&name))
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column").field("header", &self.header).finish_non_exhaustive()
    }
}

/// Default columns for order exports
#[must_use]
pub fn order_columns() -> Vec<Column<Order>> {
    vec![
        Column::new("Order ID", |o: &Order| Some(o.id.clone())),
        Column::field("Customer", "customer"),
        Column::field("Email", "email"),
        Column::field("Phone", "phone"),
        Column::new("Items", |o: &Order| {
            (!o.items.is_empty()).then(|| o.unit_count().to_string())
        }),
        Column::new("Total", |o: &Order| o.total_amount().map(|t| format!("{t:.2}"))),
        Column::field("Status", "status"),
        Column::field("Payment", "payment_method"),
        Column::new("Date", |o: &Order| {
            o.created_at.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Entity;
    use serde_json::json;

    #[test]
    fn test_missing_value_is_empty_cell() {
        let entity: Entity = serde_json::from_value(json!({ "id": "e1", "name": null })).unwrap();
        let column = Column::<Entity>::field("Name", "name");
        assert_eq!(column.header(), "Name");
        assert_eq!(column.cell(&entity), "");
    }

    #[test]
    fn test_order_columns() {
        let order: Order = serde_json::from_value(json!({
            "_id": "o1",
            "customerName": "Ravi",
            "items": [
                { "name": "Kurta", "quantity": 2, "price": 499.5 },
                { "name": "Scarf", "price": 150 }
            ],
            "status": "shipped",
            "createdAt": "2024-03-05T10:20:30Z"
        }))
        .unwrap();

        let cells: Vec<String> = order_columns().iter().map(|c| c.cell(&order)).collect();
        assert_eq!(
            cells,
            ["o1", "Ravi", "", "", "3", "1149.00", "shipped", "", "2024-03-05 10:20"]
        );
    }
}
