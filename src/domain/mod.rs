// ==========================================
// 产品目录对账系统 - 领域模型层
// ==========================================
// 职责: 定义记录、参考目录、分类类型、报告结构
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod catalog;
pub mod fields;
pub mod record;
pub mod report;
pub mod types;

// 重导出核心类型
pub use catalog::{ClassifiedRecord, CompositeKey, MatchKeySet, ReferenceCatalog, ReferenceEntry};
pub use record::{Record, RecordSet};
pub use report::{BatchResult, ReportEntry};
pub use types::{CaseCode, Channel, MatchLabel, Outcome, PriorityCode};
