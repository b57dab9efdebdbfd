// ==========================================
// 产品目录对账系统 - 批次文件运行入口
// ==========================================
// 职责: 打开数据库 → 读取配置 → 解析批次 → 对账 → 导出结果
// 错误映射:
// - 数据库打开/建表失败 → ReconcileError::Other
// - 配置读取失败 → ReconcileError::Config
// - 批次读取/结果导出失败 → ReconcileError::Import
// ==========================================

use crate::config::{ConfigManager, ReconcileConfig};
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::BatchResult;
use crate::engine::error::{ReconcileError, ReconcileResult};
use crate::engine::ReconcileOrchestrator;
use crate::importer::{CatalogReviewTransformer, CsvExporter, RecordExporter, UniversalFileParser};
use crate::repository::{ReferenceCatalogRepositoryImpl, SqliteRecordSink};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "CATALOG_RECONCILE_DB_PATH";

/// 一次运行的输入
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub db_path: String,
    pub output: PathBuf,
}

impl RunOptions {
    /// 未指定的数据库与输出路径取默认值
    pub fn new(input: PathBuf, db_path: Option<String>, output: Option<PathBuf>) -> Self {
        let db_path = db_path
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(default_db_path);
        let output = output.unwrap_or_else(|| default_output_path(&input));
        Self {
            input,
            db_path,
            output,
        }
    }
}

/// 默认数据库路径（环境变量优先，其次用户数据目录）
pub fn default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./catalog_reconcile.db");
    if let Some(data_dir) = dirs::data_local_dir() {
        let dir = data_dir.join("catalog-reconcile");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("catalog.db");
        }
    }
    path.to_string_lossy().to_string()
}

/// 默认输出路径: <输入文件名>_reconciled.csv
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("batch");
    input.with_file_name(format!("{}_reconciled.csv", stem))
}

/// 对一个批次文件执行完整对账并导出结果
#[instrument(skip(options), fields(input = %options.input.display(), db = %options.db_path))]
pub fn run_file(options: &RunOptions) -> ReconcileResult<BatchResult> {
    // === 步骤 1: 数据库与配置 ===
    let conn = open_sqlite_connection(&options.db_path)
        .with_context(|| format!("无法打开数据库: {}", options.db_path))?;
    ensure_schema(&conn).context("数据库表结构初始化失败")?;
    let conn = Arc::new(Mutex::new(conn));

    let config_manager =
        ConfigManager::from_connection(conn.clone()).map_err(ReconcileError::Config)?;
    let config = ReconcileConfig::from_reader(&config_manager).map_err(ReconcileError::Config)?;
    debug!(
        snapshot = %config_manager.get_config_snapshot().map_err(ReconcileError::Config)?,
        "配置快照"
    );

    // === 步骤 2: 读取批次 ===
    let batch = UniversalFileParser.parse(&options.input)?;
    info!(path = %options.input.display(), records = batch.len(), "批次文件已读取");

    // === 步骤 3: 对账与逐条处理 ===
    let run_id = Uuid::new_v4().to_string();
    let provider = Arc::new(ReferenceCatalogRepositoryImpl::from_connection(
        conn.clone(),
        &config,
    ));
    let sink = SqliteRecordSink::from_connection(conn, run_id.clone());
    let mut transformer = CatalogReviewTransformer::new(sink, config.write_buffer_load_limit);
    let orchestrator = ReconcileOrchestrator::new(provider, config);

    let result = orchestrator.run_batch_with_id(run_id, batch, &mut transformer)?;

    // === 步骤 4: 导出 ===
    CsvExporter.export(&result.records, &options.output)?;

    info!(
        run_id = %result.run_id,
        success = result.success,
        persisted = transformer.buffer().flushed_count(),
        output = %options.output.display(),
        "{}",
        result.message
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_sits_next_to_input() {
        let output = default_output_path(Path::new("/data/in/vendor.xlsx"));
        assert_eq!(output, PathBuf::from("/data/in/vendor_reconciled.csv"));
    }

    #[test]
    fn test_run_options_keep_explicit_paths() {
        let options = RunOptions::new(
            PathBuf::from("batch.csv"),
            Some(" my.db ".to_string()),
            Some(PathBuf::from("out.csv")),
        );
        assert_eq!(options.db_path, "my.db");
        assert_eq!(options.output, PathBuf::from("out.csv"));
    }
}
