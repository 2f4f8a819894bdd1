// ==========================================
// CapacityAllocator 引擎集成测试
// ==========================================
// 测试目标: 验证按产品族日产能的贪心分配
// 覆盖范围: 产能上限、工作日、交期优先、数量守恒、排产窗口
// ==========================================


use chrono::{Datelike, Weekday};
use klinke_planejamento::domain::capacity::CapacityTable;
use klinke_planejamento::domain::types::Family;
use klinke_planejamento::engine::CapacityAllocator;
use test_helpers::{date, monday, order, puxadores, torres};

// ==========================================
// 测试辅助函数
// ==========================================

fn allocate(
    orders: &[klinke_planejamento::Order],
    horizon_years: u32,
) -> klinke_planejamento::AllocationPlan {
    CapacityAllocator::new().allocate(orders, &CapacityTable::default(), monday(), horizon_years)
}

/// 混合订单集（两个产品族、交期乱序、含无交期订单）
fn mixed_orders() -> Vec<klinke_planejamento::Order> {
    vec![
        torres("7401", 500, date(2026, 3, 20)),
        puxadores("7402", 130, date(2026, 3, 5)),
        torres("7403", 80, date(2026, 3, 3)),
        order("7404", Family::Torres, 45, None),
        puxadores("7405", 12, date(2026, 3, 5)),
        torres("7406", 0, date(2026, 3, 2)),
        torres("7407", -20, date(2026, 3, 2)),
    ]
}

// ==========================================
// 测试用例
// ==========================================

#[test]
fn test_single_order_splits_across_days() {
    println!("\n=== 测试: 单订单跨日拆分 ===");

    let plan = allocate(&[torres("7397", 300, monday())], 2);

    assert_eq!(plan.day(monday()).unwrap().used_by(Family::Torres), 210);
    assert_eq!(plan.day(date(2026, 3, 3)).unwrap().used_by(Family::Torres), 90);
    assert_eq!(plan.days.len(), 2);
    assert_eq!(plan.unallocated_total(), 0);
}

#[test]
fn test_earlier_due_claims_capacity_first() {
    println!("\n=== 测试: 交期早的订单先占产能 ===");

    // 输入顺序与交期顺序相反
    let orders = vec![
        torres("B", 150, date(2026, 3, 10)),
        torres("A", 150, date(2026, 3, 5)),
    ];

    let plan = allocate(&orders, 2);
    let day1 = plan.day(monday()).unwrap();
    let day2 = plan.day(date(2026, 3, 3)).unwrap();

    assert_eq!(day1.fragments[0].order_number, "A");
    assert_eq!(day1.fragments[0].quantity, 150);
    assert_eq!(day1.fragments[1].order_number, "B");
    assert_eq!(day1.fragments[1].quantity, 60);
    assert_eq!(day2.fragments.len(), 1);
    assert_eq!(day2.fragments[0].quantity, 90);
}

#[test]
fn test_fully_allocated_orders_conserve_quantity() {
    println!("\n=== 测试: 片段数量之和等于订单数量 ===");

    let orders = mixed_orders();
    let plan = allocate(&orders, 2);

    for order in &orders {
        let fragments: u64 = plan
            .fragments_for(&order.id)
            .iter()
            .map(|(_, f)| f.quantity)
            .sum();
        let allocation = plan.order(&order.id).unwrap();

        assert_eq!(allocation.requested, order.schedulable_quantity());
        assert_eq!(fragments, allocation.allocated);
        assert_eq!(allocation.allocated + allocation.unallocated, allocation.requested);
        assert!(allocation.is_complete(), "订单 {} 应全部排入", order.number);
    }
}

#[test]
fn test_capacity_never_exceeded_and_no_weekends() {
    println!("\n=== 测试: 产能上限与工作日约束 ===");

    let capacity = CapacityTable::default();
    let plan = allocate(&mixed_orders(), 2);

    for (day, allocation) in &plan.days {
        assert!(
            !matches!(day.weekday(), Weekday::Sat | Weekday::Sun),
            "{} 是周末",
            day
        );
        for family in Family::ALL {
            let fragment_sum: u64 = allocation.fragments_of(family).map(|f| f.quantity).sum();
            assert_eq!(fragment_sum, allocation.used_by(family));
            assert!(allocation.used_by(family) <= capacity.get(family));
        }
    }
}

#[test]
fn test_orders_without_due_date_go_last() {
    println!("\n=== 测试: 无交期订单排在最后 ===");

    let plan = allocate(&mixed_orders(), 2);
    let last = plan.orders.last().unwrap();

    assert_eq!(last.order_number, "7404");
    assert_eq!(last.due_date, None);
}

#[test]
fn test_zero_quantity_orders_produce_no_fragments() {
    println!("\n=== 测试: 零数量与负数量订单 ===");

    let plan = allocate(&mixed_orders(), 2);

    assert!(plan.fragments_for("7406").is_empty());
    assert!(plan.fragments_for("7407").is_empty());
    let negative = plan.order("7407").unwrap();
    assert_eq!(negative.requested, 0);
    assert!(negative.is_complete());
}

#[test]
fn test_zero_capacity_family_reports_unallocated() {
    println!("\n=== 测试: 零产能产品族 ===");

    let capacity = CapacityTable::default().with(Family::Puxadores, 0);
    let orders = vec![
        puxadores("P1", 20, monday()),
        torres("T1", 100, monday()),
    ];

    let plan = CapacityAllocator::new().allocate(&orders, &capacity, monday(), 1);

    assert!(plan.fragments_for("P1").is_empty());
    assert_eq!(plan.order("P1").unwrap().unallocated, 20);
    assert_eq!(plan.order("T1").unwrap().allocated, 100);
    assert_eq!(plan.unallocated().count(), 1);
}

#[test]
fn test_horizon_limits_allocation() {
    println!("\n=== 测试: 排产窗口耗尽 ===");

    // 1 年约 262 个工作日 × 55 = 14410
    let orders = vec![puxadores("BIG", 20_000, monday())];
    let plan = allocate(&orders, 1);
    let allocation = plan.order("BIG").unwrap();

    assert!(allocation.unallocated > 0);
    assert_eq!(allocation.allocated + allocation.unallocated, 20_000);
    assert!(allocation.last_date.unwrap() <= date(2027, 3, 2));
    assert_eq!(plan.horizon_end, Some(date(2027, 3, 2)));
}

#[test]
fn test_allocate_is_idempotent() {
    println!("\n=== 测试: 相同输入相同输出 ===");

    let orders = mixed_orders();
    let first = allocate(&orders, 2);
    let second = allocate(&orders, 2);

    assert_eq!(first, second);
}
