// ==========================================
// 产品目录对账系统 - 命令行入口
// ==========================================
// 用法:
//   catalog-reconcile <input.csv|xlsx> [db_path] [output.csv]
//
// 环境变量:
//   CATALOG_RECONCILE_DB_PATH  默认数据库路径
//   CATALOG_RECONCILE_LOG=json JSON 行日志
// ==========================================

use catalog_reconcile::app::{self, RunOptions};
use catalog_reconcile::logging;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var("CATALOG_RECONCILE_LOG").as_deref() == Ok("json") {
        logging::init_json();
    } else {
        logging::init();
    }

    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .ok_or("usage: catalog-reconcile <input.csv|xlsx> [db_path] [output.csv]")?;
    let options = RunOptions::new(input, args.next(), args.next().map(PathBuf::from));

    tracing::info!("==================================================");
    tracing::info!("{} v{}", catalog_reconcile::APP_NAME, catalog_reconcile::VERSION);
    tracing::info!("使用数据库: {}", options.db_path);
    tracing::info!("==================================================");

    let result = app::run_file(&options)?;
    println!("{}", result.message);

    if result.success {
        Ok(())
    } else {
        Err(result.message.into())
    }
}
