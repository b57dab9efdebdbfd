// ==========================================
// 产品目录对账系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::reconcile_config_trait::ReconcileConfigReader;
use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::warn;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_config_value(key)?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入 global scope 配置（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON格式，按 key 排序）
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&config_map)?)
    }
}

// ==========================================
// ReconcileConfigReader 实现
// ==========================================
impl ReconcileConfigReader for ConfigManager {
    fn get_staged_base_price_sentinel(&self) -> RepositoryResult<String> {
        self.get_config_or_default(
            config_keys::STAGED_BASE_PRICE_SENTINEL,
            defaults::STAGED_BASE_PRICE_SENTINEL,
        )
    }

    fn get_pending_product_price_sentinel(&self) -> RepositoryResult<String> {
        self.get_config_or_default(
            config_keys::PENDING_PRODUCT_PRICE_SENTINEL,
            defaults::PENDING_PRODUCT_PRICE_SENTINEL,
        )
    }

    fn get_discontinued_marker(&self) -> RepositoryResult<String> {
        self.get_config_or_default(config_keys::DISCONTINUED_MARKER, defaults::DISCONTINUED_MARKER)
    }

    fn get_write_buffer_load_limit(&self) -> RepositoryResult<usize> {
        let value = self.get_config_or_default(
            config_keys::WRITE_BUFFER_LOAD_LIMIT,
            &defaults::WRITE_BUFFER_LOAD_LIMIT.to_string(),
        )?;

        match value.trim().parse::<usize>() {
            Ok(limit) if limit > 0 => Ok(limit),
            _ => {
                warn!(value = %value, "写入批量配置无效，使用默认值");
                Ok(defaults::WRITE_BUFFER_LOAD_LIMIT)
            }
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 参考目录分区
    pub const STAGED_BASE_PRICE_SENTINEL: &str = "staged_base_price_sentinel";
    pub const PENDING_PRODUCT_PRICE_SENTINEL: &str = "pending_product_price_sentinel";
    pub const DISCONTINUED_MARKER: &str = "discontinued_marker";

    // 写入缓冲
    pub const WRITE_BUFFER_LOAD_LIMIT: &str = "write_buffer_load_limit";
}

// ==========================================
// 默认值
// ==========================================
pub mod defaults {
    pub const STAGED_BASE_PRICE_SENTINEL: &str = "Load Pricing";
    pub const PENDING_PRODUCT_PRICE_SENTINEL: &str = "Load Product Price";
    pub const DISCONTINUED_MARKER: &str = "Y";
    pub const WRITE_BUFFER_LOAD_LIMIT: usize = 50;
}
