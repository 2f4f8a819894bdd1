// ==========================================
// Klinke 生产计划 - 月度占用视图
// ==========================================
// 职责: 由排产结果派生某月的逐日占用率与片段清单，供报表消费
// 输出: 当月每个工作日 × 每个产品族 {产能, 已分配, 占用率%}
// ==========================================

use crate::domain::allocation::{AllocationPlan, Fragment};
use crate::domain::capacity::{CapacityConstraint, CapacityTable, FamilyDayLoad};
use crate::domain::types::Family;
use crate::engine::calendar::{days_of_month, is_business_day};
use chrono::NaiveDate;
use serde::Serialize;

/// 单日单产品族占用
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyOccupancy {
    pub family: Family,
    pub capacity: u64,
    pub allocated: u64,
    pub occupancy_pct: f64,
}

impl FamilyOccupancy {
    fn from_load(family: Family, load: FamilyDayLoad) -> Self {
        Self {
            family,
            capacity: load.capacity,
            allocated: load.used,
            occupancy_pct: load.occupancy_pct(),
        }
    }
}

/// 单个工作日
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthDay {
    pub date: NaiveDate,
    pub families: Vec<FamilyOccupancy>, // Family::ALL 顺序
    pub fragments: Vec<Fragment>,
}

impl MonthDay {
    pub fn occupancy(&self, family: Family) -> Option<&FamilyOccupancy> {
        self.families.iter().find(|f| f.family == family)
    }
}

/// 月度视图
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub days: Vec<MonthDay>,          // 当月全部工作日，升序
    pub totals: Vec<FamilyOccupancy>, // 月合计（产能 = 日产能 × 工作日数，饱和于 u64::MAX）
}

impl MonthView {
    /// 由排产结果构建月度视图
    ///
    /// 无分配的工作日也会出现（占用率 0），周末不出现。
    pub fn build(plan: &AllocationPlan, capacity: &CapacityTable, year: i32, month: u32) -> Self {
        let days: Vec<MonthDay> = days_of_month(year, month)
            .into_iter()
            .filter(|date| is_business_day(*date))
            .map(|date| {
                let allocation = plan.day(date);
                let families = Family::ALL
                    .iter()
                    .map(|family| {
                        let load = FamilyDayLoad {
                            capacity: capacity.get(*family),
                            used: allocation.map(|a| a.used_by(*family)).unwrap_or(0),
                        };
                        FamilyOccupancy::from_load(*family, load)
                    })
                    .collect();
                MonthDay {
                    date,
                    families,
                    fragments: allocation.map(|a| a.fragments.clone()).unwrap_or_default(),
                }
            })
            .collect();

        let business_days = days.len() as u64;
        let totals = Family::ALL
            .iter()
            .map(|family| {
                let used = days
                    .iter()
                    .filter_map(|day| day.occupancy(*family))
                    .fold(0u64, |acc, o| acc.saturating_add(o.allocated));
                let load = FamilyDayLoad {
                    capacity: capacity.get(*family).saturating_mul(business_days),
                    used,
                };
                FamilyOccupancy::from_load(*family, load)
            })
            .collect();

        Self {
            year,
            month,
            days,
            totals,
        }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&MonthDay> {
        self.days.iter().find(|d| d.date == date)
    }
}
