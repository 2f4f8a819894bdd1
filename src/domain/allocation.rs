// ==========================================
// Klinke 生产计划 - 分配结果模型
// ==========================================
// 输出契约: 日期 → { 各产品族已用数量, 订单片段列表 }
// 红线: 同一日期同一产品族的片段数量之和 ≤ 日产能
// 生命周期: 每次订单或产能变化都从零重算，无持久标识
// ==========================================

use crate::domain::order::Order;
use crate::domain::types::Family;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Fragment - 订单片段
// ==========================================
// 一个订单在某一天被分配的数量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub order_id: String,     // 订单 ID
    pub order_number: String, // 订单号
    pub item: String,         // 品项
    pub family: Family,       // 产品族
    pub quantity: u64,        // 当日分配数量
}

impl Fragment {
    pub fn of(order: &Order, quantity: u64) -> Self {
        Self {
            order_id: order.id.clone(),
            order_number: order.number.clone(),
            item: order.item.clone(),
            family: order.family,
            quantity,
        }
    }
}

// ==========================================
// DayAllocation - 单日分配
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAllocation {
    pub used: BTreeMap<Family, u64>, // 各产品族已用数量
    pub fragments: Vec<Fragment>,    // 按分配顺序排列的片段
}

impl DayAllocation {
    /// 产品族已用数量（未出现为 0）
    pub fn used_by(&self, family: Family) -> u64 {
        self.used.get(&family).copied().unwrap_or(0)
    }

    /// 追加片段并累计产品族用量
    pub fn push(&mut self, fragment: Fragment) {
        let used = self.used.entry(fragment.family).or_insert(0);
        *used = used.saturating_add(fragment.quantity);
        self.fragments.push(fragment);
    }

    pub fn fragments_of(&self, family: Family) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter().filter(move |f| f.family == family)
    }

    pub fn total(&self) -> u64 {
        self.used.values().fold(0, |acc, v| acc.saturating_add(*v))
    }
}

// ==========================================
// OrderAllocation - 单订单分配结果
// ==========================================
// unallocated > 0 表示在排产窗口内产能不足，剩余数量未排
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAllocation {
    pub order_id: String,
    pub order_number: String,
    pub family: Family,
    pub due_date: Option<NaiveDate>,
    pub requested: u64,
    pub allocated: u64,
    pub unallocated: u64,
    pub first_date: Option<NaiveDate>, // 首个生产日
    pub last_date: Option<NaiveDate>,  // 末个生产日（完工日）
}

impl OrderAllocation {
    pub fn is_complete(&self) -> bool {
        self.unallocated == 0
    }

    /// 完工日晚于交期（仅提示，不参与排产）
    pub fn finishes_after_due(&self) -> bool {
        match (self.last_date, self.due_date) {
            (Some(last), Some(due)) => last > due,
            _ => false,
        }
    }
}

// ==========================================
// AllocationPlan - 排产结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub start_date: Option<NaiveDate>,
    pub horizon_end: Option<NaiveDate>,
    pub days: BTreeMap<NaiveDate, DayAllocation>, // 按日期升序
    pub orders: Vec<OrderAllocation>,             // 按排产顺序
}

impl AllocationPlan {
    pub fn day(&self, date: NaiveDate) -> Option<&DayAllocation> {
        self.days.get(&date)
    }

    /// 指定订单的全部片段（日期升序）
    pub fn fragments_for(&self, order_id: &str) -> Vec<(NaiveDate, &Fragment)> {
        self.days
            .iter()
            .flat_map(|(date, day)| {
                day.fragments
                    .iter()
                    .filter(move |f| f.order_id == order_id)
                    .map(move |f| (*date, f))
            })
            .collect()
    }

    /// 有未排数量的订单
    pub fn unallocated(&self) -> impl Iterator<Item = &OrderAllocation> {
        self.orders.iter().filter(|o| o.unallocated > 0)
    }

    pub fn unallocated_total(&self) -> u64 {
        self.orders
            .iter()
            .fold(0, |acc, o| acc.saturating_add(o.unallocated))
    }

    pub fn fragment_count(&self) -> usize {
        self.days.values().map(|d| d.fragments.len()).sum()
    }

    pub fn order(&self, order_id: &str) -> Option<&OrderAllocation> {
        self.orders.iter().find(|o| o.order_id == order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(order_id: &str, family: Family, quantity: u64) -> Fragment {
        Fragment {
            order_id: order_id.to_string(),
            order_number: order_id.to_string(),
            item: "item".to_string(),
            family,
            quantity,
        }
    }

    #[test]
    fn test_day_allocation_accumulates_per_family() {
        let mut day = DayAllocation::default();
        day.push(fragment("A", Family::Torres, 150));
        day.push(fragment("B", Family::Torres, 60));
        day.push(fragment("C", Family::Puxadores, 20));

        assert_eq!(day.used_by(Family::Torres), 210);
        assert_eq!(day.used_by(Family::Puxadores), 20);
        assert_eq!(day.total(), 230);
        assert_eq!(day.fragments_of(Family::Torres).count(), 2);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let mut day = DayAllocation::default();
        day.push(fragment("A", Family::Torres, u64::MAX));
        day.push(fragment("B", Family::Puxadores, 10));
        assert_eq!(day.total(), u64::MAX);

        let outcome = |id: &str| OrderAllocation {
            order_id: id.to_string(),
            order_number: id.to_string(),
            family: Family::Torres,
            due_date: None,
            requested: u64::MAX,
            allocated: 0,
            unallocated: u64::MAX,
            first_date: None,
            last_date: None,
        };
        let plan = AllocationPlan {
            orders: vec![outcome("A"), outcome("B")],
            ..AllocationPlan::default()
        };
        assert_eq!(plan.unallocated_total(), u64::MAX);
    }

    #[test]
    fn test_plan_serializes_iso_dates() {
        let mut plan = AllocationPlan::default();
        let mut day = DayAllocation::default();
        day.push(fragment("A", Family::Torres, 5));
        plan.days
            .insert(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), day);

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["days"]["2026-03-02"]["used"]["TORRES"], 5);
    }

    #[test]
    fn test_finishes_after_due() {
        let allocation = OrderAllocation {
            order_id: "A".to_string(),
            order_number: "A".to_string(),
            family: Family::Torres,
            due_date: NaiveDate::from_ymd_opt(2026, 3, 2),
            requested: 10,
            allocated: 10,
            unallocated: 0,
            first_date: NaiveDate::from_ymd_opt(2026, 3, 2),
            last_date: NaiveDate::from_ymd_opt(2026, 3, 3),
        };
        assert!(allocation.is_complete());
        assert!(allocation.finishes_after_due());
    }
}
