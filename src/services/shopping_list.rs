// Shopping list aggregation over the recipes in a user's cart

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    app::AppState, db::Repository, models::CartIngredient, utils::service_error::ServiceError,
};

pub const SHOPPING_LIST_HEADER: &str = "Shopping list:";
pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// Total amount of one ingredient identity across the cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
}

/// Non-empty list of aggregated items, ordered by (name, measurement_unit)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListReport {
    items: Vec<ShoppingListItem>,
}

impl ShoppingListReport {
    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ShoppingListReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", SHOPPING_LIST_HEADER)?;
        writeln!(f)?;
        for item in &self.items {
            writeln!(
                f,
                "- {} ({} {})",
                item.name, item.total_amount, item.measurement_unit
            )?;
        }
        Ok(())
    }
}

/// Group rows by (name, measurement_unit) and sum the amounts.
/// Returns None when there is nothing to list.
pub fn aggregate<I>(rows: I) -> Option<ShoppingListReport>
where
    I: IntoIterator<Item = CartIngredient>,
{
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for row in rows {
        *totals.entry((row.name, row.measurement_unit)).or_insert(0) += i64::from(row.amount);
    }

    if totals.is_empty() {
        return None;
    }

    let items = totals
        .into_iter()
        .map(|((name, measurement_unit), total_amount)| ShoppingListItem {
            name,
            measurement_unit,
            total_amount,
        })
        .collect();

    Some(ShoppingListReport { items })
}

pub struct ShoppingListAggregator {
    repository: Arc<dyn Repository>,
}

impl ShoppingListAggregator {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.repository.clone(),
        }
    }

    #[instrument(skip(self))]
    pub async fn generate(&self, user_id: Uuid) -> Result<Option<ShoppingListReport>, ServiceError> {
        let rows = self.repository.cart_ingredients(user_id).await?;
        let row_count = rows.len();
        let report = aggregate(rows);

        debug!(
            "Aggregated {} cart rows into {} shopping list items",
            row_count,
            report.as_ref().map_or(0, |r| r.items().len())
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rows_give_no_report() {
        assert_eq!(aggregate(Vec::new()), None);
    }

    #[test]
    fn test_sums_same_ingredient_identity() {
        let report = aggregate(vec![
            CartIngredient::new("Salt", "g", 10),
            CartIngredient::new("Salt", "g", 5),
        ])
        .unwrap();

        assert_eq!(report.items().len(), 1);
        assert_eq!(report.items()[0].total_amount, 15);
        assert!(report.render().contains("- Salt (15 g)\n"));
    }

    #[test]
    fn test_different_units_are_separate_groups() {
        let report = aggregate(vec![
            CartIngredient::new("Sugar", "g", 100),
            CartIngredient::new("Sugar", "tbsp", 2),
        ])
        .unwrap();

        assert_eq!(
            report.render(),
            "Shopping list:\n\n- Sugar (100 g)\n- Sugar (2 tbsp)\n"
        );
    }

    #[test]
    fn test_lines_sorted_by_name() {
        let report = aggregate(vec![
            CartIngredient::new("Water", "ml", 200),
            CartIngredient::new("Flour", "g", 500),
            CartIngredient::new("Eggs", "pcs", 2),
        ])
        .unwrap();

        let names: Vec<_> = report.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Eggs", "Flour", "Water"]);
    }

    #[test]
    fn test_totals_do_not_overflow_i32_range() {
        let rows = (0..100_000).map(|_| CartIngredient::new("Rice", "g", 32_000));
        let report = aggregate(rows).unwrap();
        assert_eq!(report.items()[0].total_amount, 3_200_000_000);
    }
}
