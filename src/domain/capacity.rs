// ==========================================
// Klinke 生产计划 - 产能领域模型
// ==========================================
// 红线: 产能约束优先于订单交期
// 用途: 每个产品族一个日产能池，单次排产期间保持不变
// ==========================================

use crate::domain::types::Family;
use serde::{Deserialize, Serialize};

// ==========================================
// CapacityTable - 产品族日产能表
// ==========================================
// 按产品族逐字段存储，查询走 match，新增产品族时编译器强制补全
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapacityTable {
    #[serde(rename = "TORRES", default)]
    pub torres: u64, // 立柱日产能（件/工作日）
    #[serde(rename = "PUXADORES", default)]
    pub puxadores: u64, // 拉手日产能（件/工作日）
}

impl CapacityTable {
    pub fn new(torres: u64, puxadores: u64) -> Self {
        Self { torres, puxadores }
    }

    /// 查询产品族日产能
    pub fn get(&self, family: Family) -> u64 {
        match family {
            Family::Torres => self.torres,
            Family::Puxadores => self.puxadores,
        }
    }

    /// 返回修改了某个产品族产能的新表
    pub fn with(mut self, family: Family, capacity: u64) -> Self {
        match family {
            Family::Torres => self.torres = capacity,
            Family::Puxadores => self.puxadores = capacity,
        }
        self
    }

    /// 按 Family::ALL 顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (Family, u64)> + '_ {
        Family::ALL.iter().map(move |f| (*f, self.get(*f)))
    }
}

impl Default for CapacityTable {
    fn default() -> Self {
        Self {
            torres: 210,
            puxadores: 55,
        }
    }
}

// ==========================================
// FamilyDayLoad - 单日单产品族负荷
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyDayLoad {
    pub capacity: u64, // 日产能
    pub used: u64,     // 已分配数量
}

// ==========================================
// Trait: CapacityConstraint
// ==========================================
// 用途: 分配引擎与月视图共用的约束检查接口
pub trait CapacityConstraint {
    /// 剩余可分配数量（不为负）
    fn available(&self) -> u64;

    /// 本次最多可分配数量
    fn allocatable(&self, requested: u64) -> u64 {
        requested.min(self.available())
    }

    /// 是否已满
    fn is_full(&self) -> bool {
        self.available() == 0
    }

    /// 占用率（百分比）；产能为 0 时返回 0
    fn occupancy_pct(&self) -> f64;
}

impl CapacityConstraint for FamilyDayLoad {
    fn available(&self) -> u64 {
        self.capacity.saturating_sub(self.used)
    }

    fn occupancy_pct(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.used as f64 / self.capacity as f64 * 100.0
    }
}
