// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持葡语（默认）和英文
// 仅 CLI 文本输出使用，引擎与导入层不做本地化
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use crate::domain::types::{Family, Finishing, OrderStatus};
use chrono::NaiveDate;

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"pt-BR" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use klinke_planejamento::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use klinke_planejamento::i18n::t_with_args;
/// let msg = t_with_args("import.file_not_found", &[("path", "/tmp/pedidos.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

// ==========================================
// 领域标签
// ==========================================

pub fn family_label(family: Family) -> String {
    t(&format!("family.{}", family.as_str().to_lowercase()))
}

pub fn status_label(status: OrderStatus) -> String {
    t(&format!("status.{}", status.key()))
}

pub fn finishing_label(finishing: Finishing) -> String {
    t(&format!("finishing.{}", finishing.as_str().to_lowercase()))
}

/// 按当前语言格式化日期（pt-BR: dd/mm/yyyy）
pub fn format_date(date: NaiveDate) -> String {
    date.format(&t("format.date")).to_string()
}

// rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
// 涉及语言切换的测试（本模块与 report）通过该锁串行化。
#[cfg(test)]
pub(crate) static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
