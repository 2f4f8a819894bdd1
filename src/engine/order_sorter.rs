// ==========================================
// Klinke 生产计划 - 订单排序引擎
// ==========================================
// 排序键:
// 1) due_date 升序（早交期优先；无交期排最后）
// 2) 订单号升序
// 3) 原始输入顺序（稳定排序保证）
// ==========================================

use crate::domain::order::Order;
use std::cmp::Ordering;

pub struct OrderSorter {
    // 无状态引擎
}

impl OrderSorter {
    pub fn new() -> Self {
        Self {}
    }

    /// 返回排序后的订单引用，不修改输入
    pub fn sort<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        let mut sorted: Vec<&Order> = orders.iter().collect();
        // sort_by 为稳定排序，键相同时保留输入顺序
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }

    /// 比较两个订单的排产优先级
    pub fn compare(&self, a: &Order, b: &Order) -> Ordering {
        let by_due = match (a.due_date, b.due_date) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_due.then_with(|| a.number.cmp(&b.number))
    }
}

impl Default for OrderSorter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Family;
    use chrono::NaiveDate;

    fn order(id: &str, number: &str, due: Option<(i32, u32, u32)>) -> Order {
        Order::new(
            number,
            Family::Torres,
            "Torre",
            10,
            due.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        )
        .with_id(id)
    }

    fn ids(sorted: &[&Order]) -> Vec<String> {
        sorted.iter().map(|o| o.id.clone()).collect()
    }

    #[test]
    fn test_sort_by_due_date_ascending() {
        let orders = vec![
            order("A", "1", Some((2026, 3, 10))),
            order("B", "2", Some((2026, 3, 5))),
            order("C", "3", Some((2026, 3, 7))),
        ];
        let sorted = OrderSorter::new().sort(&orders);
        assert_eq!(ids(&sorted), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ties_broken_by_number_then_input_order() {
        let orders = vec![
            order("A", "7400", Some((2026, 3, 5))),
            order("B", "7397", Some((2026, 3, 5))),
            order("C", "7400", Some((2026, 3, 5))),
        ];
        let sorted = OrderSorter::new().sort(&orders);
        assert_eq!(ids(&sorted), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_missing_due_date_sorts_last() {
        let orders = vec![
            order("A", "1", None),
            order("B", "2", Some((2030, 1, 1))),
        ];
        let sorted = OrderSorter::new().sort(&orders);
        assert_eq!(ids(&sorted), vec!["B", "A"]);
    }
}
