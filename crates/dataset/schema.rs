//! Column names of the sales dataset.

pub const ORDER_DATE: &str = "Order Date";
pub const SHIP_DATE: &str = "Ship Date";
pub const ORDER_YEAR: &str = "Order Year";
pub const ORDER_MONTH: &str = "Order Month";
pub const SALES: &str = "Sales";
pub const PROFIT: &str = "Profit";
pub const SHIP_MODE: &str = "Ship Mode";
pub const DELIVERY_DAYS: &str = "Delivery Days";
pub const SUB_CATEGORY: &str = "Sub-Category";
pub const UNIT_COST: &str = "Unit Cost";
pub const QUANTITY: &str = "Quantity";
pub const DISCOUNT: &str = "Discount";
pub const STATE: &str = "State";

/// Derived at load time from `Order Year` and `Order Month`.
pub const ORDER_MONTH_START: &str = "Order Month Start";

pub const DATE_COLUMNS: [&str; 2] = [ORDER_DATE, SHIP_DATE];
pub const INTEGER_COLUMNS: [&str; 2] = [ORDER_YEAR, ORDER_MONTH];
pub const NUMERIC_COLUMNS: [&str; 6] = [SALES, PROFIT, DELIVERY_DAYS, UNIT_COST, QUANTITY, DISCOUNT];
pub const TEXT_COLUMNS: [&str; 3] = [SHIP_MODE, SUB_CATEGORY, STATE];

/// Accepted layouts for date columns the CSV reader leaves as text.
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];

pub fn required_columns() -> impl Iterator<Item = &'static str> {
    DATE_COLUMNS
        .into_iter()
        .chain(INTEGER_COLUMNS)
        .chain(NUMERIC_COLUMNS)
        .chain(TEXT_COLUMNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_required_columns_unique() {
        let cols: Vec<_> = required_columns().collect();
        assert_eq!(cols.len(), 13);
        let unique: HashSet<_> = cols.iter().collect();
        assert_eq!(unique.len(), cols.len());
        assert!(!cols.contains(&ORDER_MONTH_START));
    }
}
