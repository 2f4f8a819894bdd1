// ==========================================
// Klinke 生产计划 - 领域类型定义
// ==========================================
// 产品族 / 表面处理 / 订单状态 三个封闭枚举
// 序列化格式与订单来源保持一致（大写葡语标签）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 去掉葡语重音并转大写，用于宽松解析外部标签
pub(crate) fn fold_label(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            'Á' | 'À' | 'Â' | 'Ã' | 'á' | 'à' | 'â' | 'ã' => 'A',
            'É' | 'Ê' | 'é' | 'ê' => 'E',
            'Í' | 'í' => 'I',
            'Ó' | 'Ô' | 'Õ' | 'ó' | 'ô' | 'õ' => 'O',
            'Ú' | 'ú' => 'U',
            'Ç' | 'ç' => 'C',
            '_' | '-' => ' ',
            other => other.to_ascii_uppercase(),
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ==========================================
// 产品族 (Family)
// ==========================================
// 红线: 每个产品族拥有独立的日产能池
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Family {
    Torres,    // 龙头立柱
    Puxadores, // 拉手
}

impl Family {
    /// 全部产品族（固定顺序，用于报表遍历）
    pub const ALL: [Family; 2] = [Family::Torres, Family::Puxadores];

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Torres => "TORRES",
            Family::Puxadores => "PUXADORES",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_label(s).as_str() {
            "TORRES" | "TORRE" => Ok(Family::Torres),
            "PUXADORES" | "PUXADOR" => Ok(Family::Puxadores),
            _ => Err(format!("未知产品族: {}", s)),
        }
    }
}

// ==========================================
// 表面处理 (Finishing)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Finishing {
    Polido,   // 抛光
    Escovado, // 拉丝
    Pintura,  // 喷涂
}

impl Finishing {
    pub const ALL: [Finishing; 3] = [Finishing::Polido, Finishing::Escovado, Finishing::Pintura];

    pub fn as_str(&self) -> &'static str {
        match self {
            Finishing::Polido => "POLIDO",
            Finishing::Escovado => "ESCOVADO",
            Finishing::Pintura => "PINTURA",
        }
    }
}

impl Default for Finishing {
    fn default() -> Self {
        Finishing::Polido
    }
}

impl fmt::Display for Finishing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Finishing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_label(s).as_str() {
            "POLIDO" => Ok(Finishing::Polido),
            "ESCOVADO" => Ok(Finishing::Escovado),
            "PINTURA" | "PINTADO" => Ok(Finishing::Pintura),
            _ => Err(format!("未知表面处理: {}", s)),
        }
    }
}

// ==========================================
// 订单状态 (Order Status)
// ==========================================
// 由外部协作方（看板/表单）修改，排产引擎只读不写
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "NÃO INICIADO")]
    NotStarted, // 未开始
    #[serde(rename = "AGUARDANDO CORTE")]
    AwaitingCut, // 等待切割
    #[serde(rename = "NA EXPEDIÇÃO")]
    InShipping, // 发货中
    #[serde(rename = "FOI PARA EXPEDIÇÃO")]
    Shipped, // 已发货
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::NotStarted,
        OrderStatus::AwaitingCut,
        OrderStatus::InShipping,
        OrderStatus::Shipped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::NotStarted => "NÃO INICIADO",
            OrderStatus::AwaitingCut => "AGUARDANDO CORTE",
            OrderStatus::InShipping => "NA EXPEDIÇÃO",
            OrderStatus::Shipped => "FOI PARA EXPEDIÇÃO",
        }
    }

    /// i18n 键后缀
    pub fn key(&self) -> &'static str {
        match self {
            OrderStatus::NotStarted => "not_started",
            OrderStatus::AwaitingCut => "awaiting_cut",
            OrderStatus::InShipping => "in_shipping",
            OrderStatus::Shipped => "shipped",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::NotStarted
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_label(s).as_str() {
            "NAO INICIADO" => Ok(OrderStatus::NotStarted),
            "AGUARDANDO CORTE" => Ok(OrderStatus::AwaitingCut),
            "NA EXPEDICAO" => Ok(OrderStatus::InShipping),
            "FOI PARA EXPEDICAO" => Ok(OrderStatus::Shipped),
            _ => Err(format!("未知订单状态: {}", s)),
        }
    }
}
