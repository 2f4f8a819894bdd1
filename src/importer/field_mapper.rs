// ==========================================
// Klinke 生产计划 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 标准字段映射
// 列名匹配忽略大小写与葡语重音
// ==========================================

use crate::domain::import::RawOrderRecord;
use crate::domain::types::fold_label;
use crate::importer::order_importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;

// ==========================================
// 列名别名表
// ==========================================
const ID_ALIASES: &[&str] = &["id"];
const NUMBER_ALIASES: &[&str] = &["numero", "nº do pedido", "n do pedido", "pedido", "number"];
const FAMILY_ALIASES: &[&str] = &["familia", "family"];
const ITEM_ALIASES: &[&str] = &["item", "item / produto", "produto"];
const QUANTITY_ALIASES: &[&str] = &["qtd", "quantidade", "quantity"];
const DUE_DATE_ALIASES: &[&str] = &["prazo", "prazo de entrega", "entrega", "due date"];
const FINISHING_ALIASES: &[&str] = &["acabamento", "finishing"];
const STATUS_ALIASES: &[&str] = &["status", "situacao"];
const LINE_ALIASES: &[&str] = &["linha", "linha de producao", "line"];

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_to_raw_order(&self, row: &HashMap<String, String>, row_number: usize) -> RawOrderRecord {
        // 先折叠列名，后续按别名查找
        let folded: HashMap<String, &str> = row
            .iter()
            .map(|(k, v)| (fold_label(k), v.as_str()))
            .collect();

        RawOrderRecord {
            id: Self::get_string(&folded, ID_ALIASES),
            number: Self::get_string(&folded, NUMBER_ALIASES),
            family: Self::get_string(&folded, FAMILY_ALIASES),
            item: Self::get_string(&folded, ITEM_ALIASES),
            quantity: Self::get_string(&folded, QUANTITY_ALIASES),
            due_date: Self::get_string(&folded, DUE_DATE_ALIASES),
            finishing: Self::get_string(&folded, FINISHING_ALIASES),
            status: Self::get_string(&folded, STATUS_ALIASES),
            production_line: Self::get_string(&folded, LINE_ALIASES),
            row_number,
        }
    }
}

impl FieldMapper {
    /// 提取字符串字段，按别名顺序取第一个非空值
    fn get_string(folded: &HashMap<String, &str>, aliases: &[&str]) -> Option<String> {
        aliases
            .iter()
            .filter_map(|alias| folded.get(&fold_label(alias)))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }
}
