// ==========================================
// Klinke 生产计划 - 订单领域模型
// ==========================================
// 用途: 订单来源（导入层/表单）写入，排产引擎只读
// 排产只读取 family / quantity / due_date 三个字段
// ==========================================

use crate::domain::types::{Family, Finishing, OrderStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Order - 订单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    // ===== 主键 =====
    pub id: String, // 订单唯一标识（UUID）

    // ===== 业务字段 =====
    pub number: String,              // 订单号（Nº do Pedido）
    pub family: Family,              // 产品族
    pub item: String,                // 品项/产品描述
    pub quantity: i64,               // 数量（外部来源可能为负，排产前截断为 0）
    pub due_date: Option<NaiveDate>, // 交期（仅用于排序，不做期限校验）
    pub finishing: Finishing,        // 表面处理
    pub status: OrderStatus,         // 订单状态

    // ===== 外部协作方标签 =====
    #[serde(default)]
    pub production_line: Option<String>, // 生产线标签

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// 创建新订单（生成 UUID，其余字段取默认值）
    pub fn new(
        number: impl Into<String>,
        family: Family,
        item: impl Into<String>,
        quantity: i64,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            number: number.into(),
            family,
            item: item.into(),
            quantity,
            due_date,
            finishing: Finishing::default(),
            status: OrderStatus::default(),
            production_line: None,
            created_at: Utc::now(),
        }
    }

    /// 指定订单 ID（测试与导入复用外部 ID）
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_finishing(mut self, finishing: Finishing) -> Self {
        self.finishing = finishing;
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// 可排产数量：负数截断为 0
    pub fn schedulable_quantity(&self) -> u64 {
        self.quantity.max(0) as u64
    }
}
