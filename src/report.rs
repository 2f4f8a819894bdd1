// ==========================================
// Klinke 生产计划 - 文本报表
// ==========================================
// 职责: 将排产结果 / 月度视图 / 交期汇总渲染为当前语言的文本
// 仅 CLI 使用，JSON 输出直接序列化领域结构
// ==========================================

use crate::domain::allocation::OrderAllocation;
use crate::domain::import::DqReport;
use crate::engine::due_summary::DueDateSummary;
use crate::engine::month_view::{FamilyOccupancy, MonthView};
use crate::engine::orchestrator::ScheduleResult;
use crate::i18n::{family_label, format_date, t, t_with_args};
use crate::importer::describe_violation;
use std::fmt::Write;

/// 导入结果摘要 + 违规明细
pub fn render_dq_report(report: &DqReport) -> String {
    let summary = &report.summary;
    let mut out = t_with_args(
        "import.summary",
        &[
            ("imported", &summary.success.to_string()),
            ("total", &summary.total_rows.to_string()),
            ("blocked", &summary.blocked.to_string()),
            ("warnings", &summary.warning.to_string()),
        ],
    );
    out.push('\n');
    for violation in &report.violations {
        let _ = writeln!(out, "  {}", describe_violation(violation));
    }
    out
}

fn render_order_line(order: &OrderAllocation) -> String {
    let due = order
        .due_date
        .map(format_date)
        .unwrap_or_else(|| t("report.no_due"));
    let mut line = t_with_args(
        "report.order_line",
        &[
            ("number", &order.order_number),
            ("family", &family_label(order.family)),
            ("due", &due),
            ("allocated", &order.allocated.to_string()),
            ("requested", &order.requested.to_string()),
        ],
    );

    if let (Some(first), Some(last)) = (order.first_date, order.last_date) {
        line.push(' ');
        line.push_str(&t_with_args(
            "report.days_range",
            &[("first", &format_date(first)), ("last", &format_date(last))],
        ));
    }
    if order.unallocated > 0 {
        line.push_str(" | ");
        line.push_str(&t_with_args(
            "report.unallocated",
            &[("quantity", &order.unallocated.to_string())],
        ));
    }
    if order.finishes_after_due() {
        line.push_str(" | ");
        line.push_str(&t("report.late"));
    }
    line
}

/// 排产结果：每个订单一行 + 合计
pub fn render_schedule(result: &ScheduleResult) -> String {
    let mut out = String::new();
    if let Some(start) = result.plan.start_date {
        let _ = writeln!(
            out,
            "{}",
            t_with_args("report.allocation_title", &[("start", &format_date(start))])
        );
    }
    if let Some(end) = result.plan.horizon_end {
        let _ = writeln!(
            out,
            "{}",
            t_with_args("report.horizon_end", &[("end", &format_date(end))])
        );
    }

    for order in &result.plan.orders {
        let _ = writeln!(out, "  {}", render_order_line(order));
    }

    let _ = writeln!(
        out,
        "{}",
        t_with_args(
            "report.totals",
            &[
                ("fragments", &result.fragment_count.to_string()),
                ("unallocated", &result.unallocated_total.to_string()),
            ],
        )
    );
    out
}

fn render_occupancy(occupancy: &FamilyOccupancy) -> String {
    format!(
        "{} {}/{} ({:.1}%)",
        family_label(occupancy.family),
        occupancy.allocated,
        occupancy.capacity,
        occupancy.occupancy_pct
    )
}

/// 月度视图：每个工作日一行占用率，下方列出片段
pub fn render_month(view: &MonthView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        t_with_args(
            "report.month_title",
            &[
                ("month", &format!("{:02}", view.month)),
                ("year", &view.year.to_string()),
            ],
        )
    );

    for day in &view.days {
        let families: Vec<String> = day.families.iter().map(render_occupancy).collect();
        let _ = writeln!(out, "{}  {}", format_date(day.date), families.join("  "));
        for fragment in &day.fragments {
            let _ = writeln!(
                out,
                "    #{} {} x{}",
                fragment.order_number, fragment.item, fragment.quantity
            );
        }
    }

    let totals: Vec<String> = view.totals.iter().map(render_occupancy).collect();
    let _ = writeln!(out, "{}  {}", t("report.month_totals"), totals.join("  "));
    out
}

/// 交期汇总：当月订单数 / 件数 / 每个交期日件数
pub fn render_due_summary(summary: &DueDateSummary) -> String {
    if summary.is_empty() {
        return format!("{}\n", t("report.summary_empty"));
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        t_with_args(
            "report.summary_title",
            &[
                ("month", &format!("{:02}", summary.month)),
                ("year", &summary.year.to_string()),
                ("count", &summary.order_count.to_string()),
                ("quantity", &summary.total_quantity.to_string()),
            ],
        )
    );
    for (date, quantity) in &summary.per_due_date {
        let _ = writeln!(
            out,
            "  {}",
            t_with_args(
                "report.summary_day",
                &[
                    ("date", &format_date(*date)),
                    ("quantity", &quantity.to_string()),
                ],
            )
        );
    }
    out
}
