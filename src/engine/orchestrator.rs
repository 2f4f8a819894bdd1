// ==========================================
// Klinke 生产计划 - 引擎编排器
// ==========================================
// 用途: 从配置读取产能表与排产窗口，协调排序 → 分配 → 视图派生
// 引擎本身无状态，编排器只持有配置
// ==========================================

use crate::config::SchedulerConfigReader;
use crate::domain::allocation::AllocationPlan;
use crate::domain::capacity::CapacityTable;
use crate::domain::order::Order;
use crate::engine::capacity_allocator::CapacityAllocator;
use crate::engine::due_summary::DueDateSummary;
use crate::engine::month_view::MonthView;
use crate::perf::PerfGuard;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

// ==========================================
// ScheduleResult - 排产结果
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleResult {
    // 使用的参数
    pub capacity: CapacityTable,
    pub horizon_years: u32,

    // Capacity Allocator 输出
    pub plan: AllocationPlan,

    // 汇总
    pub unallocated_total: u64,
    pub fragment_count: usize,
}

// ==========================================
// ScheduleOrchestrator - 引擎编排器
// ==========================================

pub struct ScheduleOrchestrator<C>
where
    C: SchedulerConfigReader,
{
    config: Arc<C>,
    allocator: CapacityAllocator,
}

impl<C> ScheduleOrchestrator<C>
where
    C: SchedulerConfigReader,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 配置读取器
    pub fn new(config: Arc<C>) -> Self {
        Self {
            allocator: CapacityAllocator::new(),
            config,
        }
    }

    pub fn capacity_table(&self) -> CapacityTable {
        self.config.capacity_table()
    }

    /// 执行排产
    ///
    /// # 参数
    /// - orders: 订单快照（只读）
    /// - start_date: 排产起始日（周末自动顺延到周一）
    pub fn schedule(&self, orders: &[Order], start_date: NaiveDate) -> ScheduleResult {
        let mut perf = PerfGuard::new("schedule");
        perf.set_items(orders.len());

        let capacity = self.config.capacity_table();
        let horizon_years = self.config.horizon_years();

        info!(
            orders_count = orders.len(),
            start_date = %start_date,
            horizon_years,
            "开始执行排产流程"
        );

        let plan = self
            .allocator
            .allocate(orders, &capacity, start_date, horizon_years);

        let unallocated_total = plan.unallocated_total();
        let fragment_count = plan.fragment_count();
        perf.set_output(fragment_count);

        info!(
            days = plan.days.len(),
            fragment_count,
            unallocated_total,
            "排产完成"
        );

        ScheduleResult {
            capacity,
            horizon_years,
            plan,
            unallocated_total,
            fragment_count,
        }
    }

    /// 派生某月的占用视图
    pub fn month_view(&self, plan: &AllocationPlan, year: i32, month: u32) -> MonthView {
        let _perf = PerfGuard::new("month_view");
        debug!(year, month, "构建月度视图");
        MonthView::build(plan, &self.config.capacity_table(), year, month)
    }

    /// 某月交期汇总（不依赖排产结果）
    pub fn due_summary(&self, orders: &[Order], year: i32, month: u32) -> DueDateSummary {
        DueDateSummary::for_month(orders, year, month)
    }
}
