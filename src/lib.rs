// ==========================================
// 产品目录对账系统 - 核心库
// ==========================================
// 职责: 供应商目录批次与参考目录对账、分类、逐条处理
// 技术栈: Rust + SQLite
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与目录类型
pub mod domain;

// 数据仓储层 - 参考目录 / 写入缓冲
pub mod repository;

// 引擎层 - 对账规则与逐条处理
pub mod engine;

// 导入层 - 批次文件与目录复核
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/表结构）
pub mod db;

// 日志系统
pub mod logging;

// 批次文件运行入口（命令行复用）
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CaseCode, Channel, MatchLabel, Outcome, PriorityCode};

// 领域实体
pub use domain::{
    BatchResult, ClassifiedRecord, CompositeKey, Record, RecordSet, ReferenceCatalog,
    ReferenceEntry, ReportEntry,
};

// 引擎
pub use engine::{
    LineProcessor, MatchCascade, RecordTransformer, ReconcileError, ReconcileOrchestrator,
    Reporter,
};

// 导入
pub use importer::{CatalogReviewTransformer, CsvExporter, UniversalFileParser};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产品目录对账系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!APP_NAME.is_empty());
    }
}
