use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::currency::Money;
use crate::order::{Order, OrderStatus};
use crate::product::{ProductCategory, ProductId};
use crate::timestamp::{end_of_day, start_of_day};

/// How many products the top and bottom rankings show.
pub const RANKING_LEN: usize = 10;

/// Inclusive calendar-day window of the sales dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Whether `at` falls inside the window; an open end means "through the
    /// end of `now`'s day".
    pub fn contains(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let lower = self.start.map(start_of_day);
        let upper = end_of_day(self.end.unwrap_or_else(|| now.date_naive()));
        lower.map_or(true, |lo| at >= lo) && at <= upper
    }

    /// Undated orders only count when no date was picked.
    fn admits(&self, at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match at {
            Some(at) => self.contains(at, now),
            None => self.start.is_none() && self.end.is_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSales {
    pub product_id: ProductId,
    pub name: String,
    pub category: ProductCategory,
    pub quantity: u32,
    pub revenue: Money,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesReport {
    pub total_revenue: Money,
    pub total_orders: usize,
    pub total_items: u32,
    pub average_order: Money,
    pub top_products: Vec<ProductSales>,
    pub least_products: Vec<ProductSales>,
}

impl SalesReport {
    /// Aggregate every non-cancelled order inside `range`.
    pub fn compute(orders: &[Order], range: DateRange, now: DateTime<Utc>) -> Self {
        let included: Vec<&Order> = orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .filter(|o| range.admits(o.created_at, now))
            .collect();

        // First-seen order keeps ties stable between renders.
        let mut index: HashMap<ProductId, usize> = HashMap::new();
        let mut per_product: Vec<ProductSales> = Vec::new();
        for order in &included {
            for item in &order.items {
                let slot = *index.entry(item.product.id.clone()).or_insert_with(|| {
                    per_product.push(ProductSales {
                        product_id: item.product.id.clone(),
                        name: item.product.name.clone(),
                        category: item.product.category.clone(),
                        quantity: 0,
                        revenue: Money::ZERO,
                    });
                    per_product.len() - 1
                });
                let stats = &mut per_product[slot];
                stats.quantity += item.quantity;
                stats.revenue += item.subtotal();
            }
        }

        let total_revenue: Money = included.iter().map(|o| o.total).sum();
        let total_orders = included.len();
        let total_items = per_product.iter().map(|p| p.quantity).sum();
        let average_order = if total_orders > 0 {
            Money(total_revenue.cents() / total_orders as i64)
        } else {
            Money::ZERO
        };

        let mut top_products = per_product.clone();
        top_products.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        top_products.truncate(RANKING_LEN);

        let mut least_products = per_product;
        least_products.sort_by(|a, b| a.quantity.cmp(&b.quantity));
        least_products.truncate(RANKING_LEN);

        SalesReport {
            total_revenue,
            total_orders,
            total_items,
            average_order,
            top_products,
            least_products,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::cart::CartItem;
    use crate::order::fixtures::order;
    use crate::product::fixtures::menu;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 12, 15, 0, 0).unwrap()
    }

    #[test]
    fn excludes_cancelled_and_ranks_by_quantity() {
        let menu = menu();
        let mut big = order(2, OrderStatus::Completed, 10, "1");
        big.items = vec![CartItem { product: menu[1].clone(), quantity: 5 }];
        big.total = Money(4000);
        let orders = vec![
            order(1, OrderStatus::Ready, 9, "1"),
            big,
            order(3, OrderStatus::Cancelled, 11, "1"),
        ];
        let report = SalesReport::compute(&orders, DateRange::default(), now());
        assert_eq!(report.total_orders, 2);
        assert_eq!(report.total_revenue, orders[0].total + Money(4000));
        assert_eq!(report.total_items, 2 + 1 + 5);
        assert_eq!(report.top_products[0].name, "Hot Dog");
        assert_eq!(report.top_products[0].revenue, Money(4000));
        assert_eq!(report.least_products[0].quantity, 1);
        assert_eq!(
            report.average_order,
            Money((orders[0].total.cents() + 4000) / 2)
        );
    }

    #[test]
    fn date_range_is_inclusive_of_whole_end_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let range = DateRange { start: Some(day), end: Some(day) };
        let late = Utc.with_ymd_and_hms(2025, 3, 10, 23, 59, 59).unwrap();
        let next = Utc.with_ymd_and_hms(2025, 3, 11, 0, 0, 0).unwrap();
        assert!(range.contains(late, now()));
        assert!(!range.contains(next, now()));

        let open_end = DateRange { start: Some(day), end: None };
        assert!(open_end.contains(next, now()));
        assert!(open_end.contains(now() + chrono::Duration::hours(8), now()));
        assert!(!open_end.contains(now() + chrono::Duration::hours(9), now()));
    }

    #[test]
    fn empty_window_yields_zero_average() {
        let orders = vec![order(1, OrderStatus::Ready, 9, "1")];
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let range = DateRange { start: Some(day), end: Some(day) };
        let report = SalesReport::compute(&orders, range, now());
        assert_eq!(report.total_orders, 0);
        assert_eq!(report.average_order, Money::ZERO);
        assert!(report.top_products.is_empty());
    }

    #[test]
    fn undated_orders_count_only_without_a_range() {
        let mut undated = order(1, OrderStatus::Completed, 9, "1");
        undated.created_at = None;
        let orders = vec![undated, order(2, OrderStatus::Completed, 10, "1")];

        let all = SalesReport::compute(&orders, DateRange::default(), now());
        assert_eq!(all.total_orders, 2);

        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let range = DateRange { start: Some(day), end: None };
        let ranged = SalesReport::compute(&orders, range, now());
        assert_eq!(ranged.total_orders, 1);
    }

    #[test]
    fn rankings_keep_ten_each_way() {
        let orders: Vec<Order> = (1..=12)
            .map(|i| {
                let mut o = order(i, OrderStatus::Completed, 9, "1");
                let mut product = menu()[0].clone();
                product.id = crate::identity::EntityId::from(100 + i);
                product.name = format!("Item {i}");
                o.items = vec![CartItem { product, quantity: i as u32 }];
                o.total = Money(100 * i);
                o
            })
            .collect();

        let report = SalesReport::compute(&orders, DateRange::default(), now());
        assert_eq!(report.total_items, (1..=12).sum::<u32>());

        let top: Vec<u32> = report.top_products.iter().map(|p| p.quantity).collect();
        assert_eq!(top.len(), RANKING_LEN);
        assert_eq!(top, (3..=12).rev().collect::<Vec<u32>>());
        assert_eq!(report.top_products[0].name, "Item 12");

        let least: Vec<u32> = report.least_products.iter().map(|p| p.quantity).collect();
        assert_eq!(least.len(), RANKING_LEN);
        assert_eq!(least, (1..=10).collect::<Vec<u32>>());
        assert_eq!(report.least_products[0].name, "Item 1");
    }
}
