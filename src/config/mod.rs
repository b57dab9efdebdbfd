// ==========================================
// 产品目录对账系统 - 配置层
// ==========================================
// 职责: 对账配置管理（哨兵值 / 停用标记 / 写入批量）
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod reconcile_config;
pub mod reconcile_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use reconcile_config::ReconcileConfig;
pub use reconcile_config_trait::ReconcileConfigReader;
