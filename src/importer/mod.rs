// ==========================================
// 产品目录对账系统 - 导入层
// ==========================================
// 职责: 批次文件读取 / 结果导出 / 字段清洗 / 目录复核转换器
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod catalog_review;
pub mod data_cleaner;
pub mod error;
pub mod exporter;
pub mod file_parser;
pub mod importer_trait;

// 重导出核心类型
pub use catalog_review::CatalogReviewTransformer;
pub use data_cleaner::{DataCleaner, NumberCheck};
pub use error::{ImportError, ImportResult};
pub use exporter::CsvExporter;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};

// 重导出 Trait 接口
pub use importer_trait::{FileParser, RecordExporter};
