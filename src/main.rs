// ==========================================
// Klinke 生产计划 - 命令行入口
// ==========================================
// 子命令: allocate / month / summary / init-config
// stdout: JSON 或文本报表；stderr: 日志与 DQ 明细
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use klinke_planejamento::config::scheduler_config::DEFAULT_LOCALE;
use klinke_planejamento::config::{ConfigManager, SchedulerConfig, SchedulerConfigReader};
use klinke_planejamento::engine::{calendar, ScheduleOrchestrator};
use klinke_planejamento::i18n::{self, t_with_args};
use klinke_planejamento::importer::{ImportError, OrderImporter};
use klinke_planejamento::{logging, report, Order};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "klinke-planejamento")]
#[command(version, about = "Planejamento de produção por capacidade diária de cada família")]
struct Cli {
    /// Arquivo de configuração (padrão: KLINKE_CONFIG ou diretório de configuração do usuário)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Idioma da saída em texto (pt-BR, en)
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Distribui os pedidos pelos dias úteis
    Allocate {
        /// Arquivo de pedidos (.csv, .xlsx, .xls)
        #[arg(long)]
        orders: PathBuf,

        /// Data inicial (AAAA-MM-DD), padrão: hoje
        #[arg(long)]
        start: Option<NaiveDate>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Ocupação diária de um mês
    Month {
        #[arg(long)]
        orders: PathBuf,

        #[arg(long)]
        year: i32,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,

        /// Desloca o mês em N meses (ex.: -1 = mês anterior)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,

        #[arg(long)]
        start: Option<NaiveDate>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Pedidos com prazo no mês
    Summary {
        #[arg(long)]
        orders: PathBuf,

        #[arg(long)]
        year: i32,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,

        /// Desloca o mês em N meses (ex.: -1 = mês anterior)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Grava a configuração padrão
    InitConfig {
        /// Sobrescreve o arquivo existente
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        // init-config 只定位路径，配置文件损坏时仍可覆盖
        Commands::InitConfig { force } => {
            i18n::set_locale(cli.locale.as_deref().unwrap_or(DEFAULT_LOCALE));
            init_config(cli.config.as_deref(), force)?;
        }
        Commands::Allocate {
            orders,
            start,
            format,
        } => {
            let manager = load_config(cli.config.as_deref(), cli.locale.as_deref())?;
            let orders = load_orders(&orders)?;
            let orchestrator = ScheduleOrchestrator::new(Arc::new(manager));
            let result = orchestrator.schedule(&orders, start.unwrap_or_else(today));

            match format {
                OutputFormat::Json => print_json(&result)?,
                OutputFormat::Text => print!("{}", report::render_schedule(&result)),
            }
        }
        Commands::Month {
            orders,
            year,
            month,
            offset,
            start,
            format,
        } => {
            let (year, month) = calendar::shift_month(year, month, offset);
            let manager = load_config(cli.config.as_deref(), cli.locale.as_deref())?;
            let orders = load_orders(&orders)?;
            let orchestrator = ScheduleOrchestrator::new(Arc::new(manager));
            let result = orchestrator.schedule(&orders, start.unwrap_or_else(today));
            let view = orchestrator.month_view(&result.plan, year, month);

            match format {
                OutputFormat::Json => print_json(&view)?,
                OutputFormat::Text => print!("{}", report::render_month(&view)),
            }
        }
        Commands::Summary {
            orders,
            year,
            month,
            offset,
            format,
        } => {
            let (year, month) = calendar::shift_month(year, month, offset);
            let manager = load_config(cli.config.as_deref(), cli.locale.as_deref())?;
            let orders = load_orders(&orders)?;
            let orchestrator = ScheduleOrchestrator::new(Arc::new(manager));
            let summary = orchestrator.due_summary(&orders, year, month);

            match format {
                OutputFormat::Json => print_json(&summary)?,
                OutputFormat::Text => print!("{}", report::render_due_summary(&summary)),
            }
        }
    }

    Ok(())
}

/// 加载配置并按 --locale 或配置文件设置语言
fn load_config(path: Option<&Path>, locale: Option<&str>) -> Result<ConfigManager> {
    let manager = ConfigManager::load(path).with_context(|| i18n::t("config.load_failed"))?;
    i18n::set_locale(locale.unwrap_or(&manager.locale()));
    Ok(manager)
}

/// 写入默认配置；已存在且未指定 --force 时报错
fn init_config(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = ConfigManager::resolve_path(explicit)?;
    let display = path.display().to_string();
    if path.exists() && !force {
        bail!(t_with_args("config.exists", &[("path", &display)]));
    }

    ConfigManager::from_config(path, SchedulerConfig::default())?.save()?;
    println!("{}", t_with_args("config.written", &[("path", &display)]));
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 导入订单文件，DQ 明细写 stderr
fn load_orders(path: &Path) -> Result<Vec<Order>> {
    let display = path.display().to_string();
    let imported = OrderImporter::new().import_file(path).map_err(|e| match e {
        ImportError::FileNotFound(_) => {
            anyhow::anyhow!(t_with_args("import.file_not_found", &[("path", &display)]))
        }
        other => anyhow::Error::new(other)
            .context(t_with_args("import.failed", &[("path", &display)])),
    })?;

    eprint!("{}", report::render_dq_report(&imported.dq_report));
    Ok(imported.orders)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
