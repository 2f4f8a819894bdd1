// ==========================================
// Klinke 生产计划 - 交期月汇总
// ==========================================
// 职责: 按交期统计某月订单（订单数 / 件数 / 每个交期日件数）
// 与排产结果无关，只看订单交期
// ==========================================

use crate::domain::order::Order;
use crate::engine::order_sorter::OrderSorter;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueDateSummary {
    pub year: i32,
    pub month: u32,
    pub order_count: usize,
    pub total_quantity: u64,
    pub per_due_date: BTreeMap<NaiveDate, u64>,
    pub orders: Vec<Order>, // 交期在当月的订单，按排产顺序
}

impl DueDateSummary {
    /// 统计交期落在 year-month 的订单；无交期订单不计入
    pub fn for_month(orders: &[Order], year: i32, month: u32) -> Self {
        let in_month: Vec<Order> = OrderSorter::new()
            .sort(orders)
            .into_iter()
            .filter(|o| {
                o.due_date
                    .map(|due| due.year() == year && due.month() == month)
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        let mut per_due_date = BTreeMap::new();
        let mut total_quantity: u64 = 0;
        for order in &in_month {
            let quantity = order.schedulable_quantity();
            total_quantity = total_quantity.saturating_add(quantity);
            if let Some(due) = order.due_date {
                let day_total: &mut u64 = per_due_date.entry(due).or_insert(0);
                *day_total = day_total.saturating_add(quantity);
            }
        }

        Self {
            year,
            month,
            order_count: in_month.len(),
            total_quantity,
            per_due_date,
            orders: in_month,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
