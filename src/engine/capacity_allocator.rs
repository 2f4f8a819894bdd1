// ==========================================
// Klinke 生产计划 - 产能分配引擎
// ==========================================
// 红线: 产能约束优先于订单交期
// 职责: 数量驱动的逐日产能分配
// 输入: 订单列表 + 产品族日产能表 + 起始日 + 排产窗口(年)
// 输出: 日期 → 各产品族用量 + 订单片段；每个订单的未排数量
// ==========================================
// 规则:
// 1) 订单按交期升序依次处理，早交期订单先占满当日产能（贪心）
// 2) 每个订单从起始日开始，逐个工作日填充剩余产能
// 3) 周六周日不分配
// 4) 超出排产窗口仍未排完的数量记入 unallocated，不报错
// ==========================================

use crate::domain::allocation::{AllocationPlan, DayAllocation, Fragment, OrderAllocation};
use crate::domain::capacity::{CapacityConstraint, CapacityTable, FamilyDayLoad};
use crate::domain::order::Order;
use crate::engine::calendar::{horizon_end, is_business_day, next_business_day};
use crate::engine::order_sorter::OrderSorter;
use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

// ==========================================
// CapacityAllocator - 产能分配引擎
// ==========================================
pub struct CapacityAllocator {
    sorter: OrderSorter,
}

impl CapacityAllocator {
    pub fn new() -> Self {
        Self {
            sorter: OrderSorter::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算完整排产结果
    ///
    /// 纯函数: 相同输入得到相同输出，不持有跨调用状态。
    ///
    /// # 参数
    /// - `orders`: 订单列表（任意顺序）
    /// - `capacity`: 产品族日产能
    /// - `start_date`: 起始日（通常为今天，可为周末）
    /// - `horizon_years`: 排产窗口（年），窗口末日含在内
    ///
    /// # 返回
    /// AllocationPlan（days 按日期升序，orders 按排产顺序）
    #[instrument(skip(self, orders, capacity), fields(orders_count = orders.len()))]
    pub fn allocate(
        &self,
        orders: &[Order],
        capacity: &CapacityTable,
        start_date: NaiveDate,
        horizon_years: u32,
    ) -> AllocationPlan {
        let end = horizon_end(start_date, horizon_years);
        let initial = AllocationPlan {
            start_date: Some(start_date),
            horizon_end: Some(end),
            ..AllocationPlan::default()
        };

        let plan = self
            .sorter
            .sort(orders)
            .into_iter()
            .fold(initial, |plan, order| {
                self.place_order(plan, order, capacity, start_date, end)
            });

        debug!(
            days = plan.days.len(),
            fragments = plan.fragment_count(),
            unallocated_total = plan.unallocated_total(),
            "产能分配完成"
        );
        plan
    }

    /// 将单个订单放入排产结果，返回扩展后的结果
    fn place_order(
        &self,
        mut plan: AllocationPlan,
        order: &Order,
        capacity: &CapacityTable,
        start_date: NaiveDate,
        end: NaiveDate,
    ) -> AllocationPlan {
        let requested = order.schedulable_quantity();
        let daily_capacity = capacity.get(order.family);

        let mut remaining = requested;
        let mut cursor = start_date;
        let mut first_date = None;
        let mut last_date = None;

        while remaining > 0 && cursor <= end {
            if !is_business_day(cursor) {
                match next_business_day(cursor) {
                    Some(next) => cursor = next,
                    None => break,
                }
                continue;
            }

            let load = FamilyDayLoad {
                capacity: daily_capacity,
                used: plan
                    .days
                    .get(&cursor)
                    .map(|day| day.used_by(order.family))
                    .unwrap_or(0),
            };
            let alloc = load.allocatable(remaining);

            if alloc > 0 {
                plan.days
                    .entry(cursor)
                    .or_insert_with(DayAllocation::default)
                    .push(Fragment::of(order, alloc));
                remaining -= alloc;
                first_date.get_or_insert(cursor);
                last_date = Some(cursor);
            }

            if remaining > 0 {
                // 日历尽头: 剩余数量记入 unallocated
                match next_business_day(cursor) {
                    Some(next) => cursor = next,
                    None => break,
                }
            }
        }

        if remaining > 0 {
            warn!(
                order_id = %order.id,
                order_number = %order.number,
                family = %order.family,
                requested,
                unallocated = remaining,
                horizon_end = %end,
                "排产窗口内未能排完订单数量"
            );
        }

        plan.orders.push(OrderAllocation {
            order_id: order.id.clone(),
            order_number: order.number.clone(),
            family: order.family,
            due_date: order.due_date,
            requested,
            allocated: requested - remaining,
            unallocated: remaining,
            first_date,
            last_date,
        });
        plan
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for CapacityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Family;

    // ==========================================
    // 测试辅助函数
    // ==========================================

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// 2026-03-02 为周一
    fn monday() -> NaiveDate {
        d(2026, 3, 2)
    }

    fn create_test_order(id: &str, family: Family, quantity: i64, due: NaiveDate) -> Order {
        Order::new(id, family, format!("item-{}", id), quantity, Some(due)).with_id(id)
    }

    // ==========================================
    // 基础功能测试
    // ==========================================

    #[test]
    fn test_split_across_two_business_days() {
        let allocator = CapacityAllocator::new();
        let orders = vec![create_test_order("P1", Family::Torres, 300, monday())];

        let plan = allocator.allocate(&orders, &CapacityTable::new(210, 55), monday(), 1);

        assert_eq!(plan.days.len(), 2);
        assert_eq!(plan.days[&monday()].used_by(Family::Torres), 210);
        assert_eq!(plan.days[&d(2026, 3, 3)].used_by(Family::Torres), 90);
        assert_eq!(plan.orders[0].first_date, Some(monday()));
        assert_eq!(plan.orders[0].last_date, Some(d(2026, 3, 3)));
        assert!(plan.orders[0].is_complete());
    }

    #[test]
    fn test_earlier_due_claims_capacity_first() {
        let allocator = CapacityAllocator::new();
        // 输入顺序与交期相反
        let orders = vec![
            create_test_order("LATE", Family::Torres, 150, d(2026, 3, 10)),
            create_test_order("EARLY", Family::Torres, 150, d(2026, 3, 5)),
        ];

        let plan = allocator.allocate(&orders, &CapacityTable::new(210, 55), monday(), 1);

        let day1 = &plan.days[&monday()];
        assert_eq!(day1.fragments[0].order_id, "EARLY");
        assert_eq!(day1.fragments[0].quantity, 150);
        assert_eq!(day1.fragments[1].order_id, "LATE");
        assert_eq!(day1.fragments[1].quantity, 60);

        let day2 = &plan.days[&d(2026, 3, 3)];
        assert_eq!(day2.fragments.len(), 1);
        assert_eq!(day2.fragments[0].quantity, 90);
    }

    #[test]
    fn test_families_use_independent_pools() {
        let allocator = CapacityAllocator::new();
        let orders = vec![
            create_test_order("T", Family::Torres, 210, monday()),
            create_test_order("P", Family::Puxadores, 55, monday()),
        ];

        let plan = allocator.allocate(&orders, &CapacityTable::new(210, 55), monday(), 1);

        assert_eq!(plan.days.len(), 1);
        let day = &plan.days[&monday()];
        assert_eq!(day.used_by(Family::Torres), 210);
        assert_eq!(day.used_by(Family::Puxadores), 55);
    }

    #[test]
    fn test_weekend_start_moves_to_monday() {
        let allocator = CapacityAllocator::new();
        let saturday = d(2026, 3, 7);
        let orders = vec![create_test_order("P1", Family::Puxadores, 60, saturday)];

        let plan = allocator.allocate(&orders, &CapacityTable::new(210, 55), saturday, 1);

        let dates: Vec<NaiveDate> = plan.days.keys().copied().collect();
        assert_eq!(dates, vec![d(2026, 3, 9), d(2026, 3, 10)]);
        assert_eq!(plan.days[&d(2026, 3, 10)].used_by(Family::Puxadores), 5);
    }

    #[test]
    fn test_friday_overflow_continues_on_monday() {
        let allocator = CapacityAllocator::new();
        let friday = d(2026, 3, 6);
        let orders = vec![create_test_order("P1", Family::Torres, 400, friday)];

        let plan = allocator.allocate(&orders, &CapacityTable::new(210, 55), friday, 1);

        assert_eq!(plan.days[&friday].used_by(Family::Torres), 210);
        assert_eq!(plan.days[&d(2026, 3, 9)].used_by(Family::Torres), 190);
        assert!(plan.day(d(2026, 3, 7)).is_none());
        assert!(plan.day(d(2026, 3, 8)).is_none());
    }

    // ==========================================
    // 退化输入测试
    // ==========================================

    #[test]
    fn test_zero_and_negative_quantity_produce_no_fragments() {
        let allocator = CapacityAllocator::new();
        let orders = vec![
            create_test_order("Z", Family::Torres, 0, monday()),
            create_test_order("N", Family::Torres, -20, monday()),
        ];

        let plan = allocator.allocate(&orders, &CapacityTable::new(210, 55), monday(), 1);

        assert!(plan.days.is_empty());
        assert_eq!(plan.orders.len(), 2);
        assert!(plan.orders.iter().all(|o| o.requested == 0 && o.is_complete()));
    }

    #[test]
    fn test_zero_capacity_reports_unallocated() {
        let allocator = CapacityAllocator::new();
        let orders = vec![
            create_test_order("P", Family::Puxadores, 30, monday()),
            create_test_order("T", Family::Torres, 30, monday()),
        ];

        let plan = allocator.allocate(&orders, &CapacityTable::new(210, 0), monday(), 1);

        let puxadores = plan.order("P").unwrap();
        assert_eq!(puxadores.allocated, 0);
        assert_eq!(puxadores.unallocated, 30);
        assert_eq!(puxadores.first_date, None);
        assert!(plan.order("T").unwrap().is_complete());
        assert_eq!(plan.unallocated_total(), 30);
    }

    #[test]
    fn test_horizon_limits_allocation() {
        let allocator = CapacityAllocator::new();
        // 0 年窗口: 只有起始日可用
        let orders = vec![create_test_order("P1", Family::Torres, 300, monday())];

        let plan = allocator.allocate(&orders, &CapacityTable::new(210, 55), monday(), 0);

        assert_eq!(plan.days.len(), 1);
        let outcome = &plan.orders[0];
        assert_eq!(outcome.allocated, 210);
        assert_eq!(outcome.unallocated, 90);
        assert_eq!(plan.unallocated().count(), 1);
    }

    #[test]
    fn test_calendar_end_reports_unallocated() {
        let allocator = CapacityAllocator::new();
        let start = NaiveDate::MAX - chrono::Duration::days(10);
        let orders = vec![create_test_order("P1", Family::Torres, 5000, start)];

        let plan = allocator.allocate(&orders, &CapacityTable::new(210, 55), start, 1);

        assert_eq!(plan.horizon_end, Some(NaiveDate::MAX));
        let outcome = &plan.orders[0];
        assert!(outcome.allocated > 0);
        assert!(outcome.unallocated > 0);
        assert_eq!(outcome.allocated + outcome.unallocated, 5000);
        assert!(plan.days.keys().all(|day| is_business_day(*day)));
    }

    #[test]
    fn test_allocate_is_idempotent() {
        let allocator = CapacityAllocator::new();
        let orders = vec![
            create_test_order("A", Family::Torres, 500, d(2026, 3, 4)),
            create_test_order("B", Family::Puxadores, 120, d(2026, 3, 3)),
            create_test_order("C", Family::Torres, 90, d(2026, 3, 3)),
        ];
        let capacity = CapacityTable::new(210, 55);

        let first = allocator.allocate(&orders, &capacity, monday(), 2);
        let second = allocator.allocate(&orders, &capacity, monday(), 2);

        assert_eq!(first, second);
    }
}
