// ==========================================
// 产品目录对账系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 参考目录读取 / 对账结果写出,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod record_sink_impl;
pub mod reference_catalog_repo;
pub mod reference_catalog_repo_impl;
pub mod write_buffer;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use record_sink_impl::SqliteRecordSink;
pub use reference_catalog_repo::ReferenceCatalogProvider;
pub use reference_catalog_repo_impl::ReferenceCatalogRepositoryImpl;
pub use write_buffer::{MemoryRecordSink, RecordSink, WriteBuffer};
