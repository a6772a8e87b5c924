//! # 示例应用程序
//!
//! 使用演示类型目录装配 XML 描述文件，并以 JSON 输出装配摘要。

mod demo;

use anyhow::Context;
use clap::Parser;
use config_impl::WiringSettings;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use wiring_common::ManagerHandle;
use wiring_composition::{LoggingConfig, WiringBuilder, WiringContext};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "组件装配示例应用")]
struct Args {
    /// 描述文件路径
    #[arg(short, long, default_value = "example-app/config/wiring.xml")]
    descriptor: PathBuf,

    /// 装配设置文件，指定后忽略 --descriptor
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 使用生产环境日志格式
    #[arg(long)]
    production: bool,

    /// 查询的客户编号
    #[arg(long, default_value_t = 1)]
    customer: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logging = if args.production {
        LoggingConfig::production()
    } else {
        LoggingConfig {
            level: args.log_level.parse().context("无效的日志级别")?,
            ..LoggingConfig::development()
        }
    };

    let builder = WiringBuilder::new()
        .with_catalog(Arc::new(demo::catalog().context("构建演示类型目录失败")?))
        .with_manager(ManagerHandle::new(demo::DataSourceManager {
            url: "memory://demo".to_string(),
        }))
        .with_logging(logging);

    let context = match &args.settings {
        Some(path) => {
            let base = path.parent().map(PathBuf::from).unwrap_or_default();
            let settings = WiringSettings::load(Some(path))
                .with_context(|| format!("加载装配设置失败: {}", path.display()))?
                .resolve_paths(&base);
            builder.wire_with_settings(&settings).await
        }
        None => builder.wire_file(&args.descriptor).await,
    }
    .context("装配失败")?;

    report(&context, args.customer)?;
    Ok(())
}

fn report(context: &WiringContext, customer: u32) -> anyhow::Result<()> {
    if let Some(orders) = context.service::<demo::OrderService>("demo.service.OrderService") {
        match orders.describe(customer) {
            Some(line) => info!("{}", line),
            None => info!("客户 {} 不存在", customer),
        }
    }
    if let Some(reports) = context.service::<demo::ReportService>("demo.service.ReportService") {
        info!("订单总数: {}", reports.total_orders(&[1, 2, 3]));
    }

    let summary = serde_json::to_string_pretty(&context.summary())?;
    println!("{}", summary);
    Ok(())
}
