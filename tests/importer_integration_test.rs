// ==========================================
// 订单导入集成测试
// ==========================================
// 测试目标: 文件 → 映射 → 校验 → 可排产订单
// 覆盖范围: CSV 列名别名、DQ 阻断/警告、文件级错误
// ==========================================


use klinke_planejamento::domain::import::DqLevel;
use klinke_planejamento::domain::types::{Family, Finishing, OrderStatus};
use klinke_planejamento::importer::{ImportError, OrderImporter};
use klinke_planejamento::logging;
use test_helpers::{date, write_csv};

#[test]
fn test_import_csv_with_display_headers() {
    println!("\n=== 测试: 界面导出列名的 CSV ===");
    logging::init_test();

    let (_dir, path) = write_csv(
        "pedidos.csv",
        &[
            "Nº do Pedido;Família;Item / Produto;Quantidade;Prazo;Acabamento;Status",
            "7397;TORRES;Torre 300mm 1 furo;300;02/03/2026;ESCOVADO;NÃO INICIADO",
            "7398;Puxadores;Puxador 128mm;40;2026-03-03;pintura;aguardando corte",
        ],
    );

    let result = OrderImporter::new().import_file(&path).unwrap();

    assert_eq!(result.file_name.as_deref(), Some("pedidos.csv"));
    assert_eq!(result.orders.len(), 2);
    assert!(result.dq_report.violations.is_empty());

    let first = &result.orders[0];
    assert_eq!(first.number, "7397");
    assert_eq!(first.family, Family::Torres);
    assert_eq!(first.quantity, 300);
    assert_eq!(first.due_date, Some(date(2026, 3, 2)));
    assert_eq!(first.finishing, Finishing::Escovado);
    assert_eq!(first.status, OrderStatus::NotStarted);

    let second = &result.orders[1];
    assert_eq!(second.family, Family::Puxadores);
    assert_eq!(second.finishing, Finishing::Pintura);
    assert_eq!(second.status, OrderStatus::AwaitingCut);
}

#[test]
fn test_import_csv_dq_levels() {
    println!("\n=== 测试: DQ 阻断与警告 ===");
    logging::init_test();

    let (_dir, path) = write_csv(
        "pedidos.csv",
        &[
            "numero,familia,item,qtd,prazo",
            ",TORRES,Sem número,10,2026-03-02",
            "7401,GAVETAS,Gaveta,10,2026-03-02",
            "7402,TORRES,Torre,-5,2026-03-02",
            "7403,TORRES,Torre,12.9,amanhã",
            "7403,PUXADORES,Puxador,3,2026-03-04",
        ],
    );

    let result = OrderImporter::new().import_file(&path).unwrap();
    let report = &result.dq_report;

    // 行号: 表头为第 1 行
    assert_eq!(report.summary.total_rows, 5);
    assert_eq!(report.summary.blocked, 2);
    assert_eq!(report.summary.success, 3);
    assert_eq!(report.summary.conflict, 1);
    assert!(report
        .violations_for_row(2)
        .any(|v| v.level == DqLevel::Error && v.field == "number"));
    assert!(report
        .violations_for_row(3)
        .any(|v| v.level == DqLevel::Error && v.field == "family"));

    let numbers: Vec<&str> = result.orders.iter().map(|o| o.number.as_str()).collect();
    assert_eq!(numbers, vec!["7402", "7403", "7403"]);

    // 负数 → 0，小数截断，无法解析的交期 → None
    assert_eq!(result.orders[0].quantity, 0);
    assert_eq!(result.orders[1].quantity, 12);
    assert_eq!(result.orders[1].due_date, None);
}

#[test]
fn test_import_file_level_errors() {
    println!("\n=== 测试: 文件级错误 ===");
    logging::init_test();

    let importer = OrderImporter::new();

    let missing = importer.import_file("/nao/existe/pedidos.csv");
    assert!(matches!(missing, Err(ImportError::FileNotFound(_))));

    let (_dir, path) = write_csv("pedidos.txt", &["numero"]);
    let unsupported = importer.import_file(&path);
    assert!(matches!(unsupported, Err(ImportError::UnsupportedFormat(_))));
}

#[test]
fn test_import_generates_ids_and_batch() {
    println!("\n=== 测试: 生成订单 ID 与批次号 ===");
    logging::init_test();

    let (_dir, path) = write_csv(
        "pedidos.csv",
        &["numero,familia,qtd", "1,TORRES,10", "2,TORRES,20"],
    );

    let result = OrderImporter::new().import_file(&path).unwrap();

    assert!(!result.batch_id.is_empty());
    assert_eq!(result.dq_report.batch_id, result.batch_id);
    assert_ne!(result.orders[0].id, result.orders[1].id);
}
