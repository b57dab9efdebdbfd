// ==========================================
// 产品目录对账系统 - 参考目录 Repository 实现
// ==========================================
// 职责: 读写 product_action_review 表（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::config::ReconcileConfig;
use crate::db::open_sqlite_connection;
use crate::domain::catalog::{CompositeKey, ReferenceCatalog, ReferenceEntry};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::reference_catalog_repo::ReferenceCatalogProvider;
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

// ==========================================
// ReferenceCatalogRepositoryImpl
// ==========================================
pub struct ReferenceCatalogRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
    config: ReconcileConfig,
}

impl ReferenceCatalogRepositoryImpl {
    /// 创建新的 Repository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    /// - config: 提供待定价哨兵与停用标记
    pub fn new(db_path: &str, config: &ReconcileConfig) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self::from_connection(Arc::new(Mutex::new(conn)), config))
    }

    /// 从已有连接创建
    pub fn from_connection(conn: Arc<Mutex<Connection>>, config: &ReconcileConfig) -> Self {
        Self {
            conn,
            config: config.clone(),
        }
    }

    /// 批量插入参考条目（单事务）
    ///
    /// # 返回
    /// - Ok(usize): 插入条数
    /// - Err: 数据库错误（整个事务回滚）
    pub fn insert_entries(&self, entries: &[ReferenceEntry]) -> RepositoryResult<usize> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO product_action_review (
                    catalog_number, manufacturer_name, manufacturer_part_number,
                    product_number, vendor_name, vendor_part_number,
                    product_id, product_price_id, base_product_price_id, is_discontinued
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )?;

            for entry in entries {
                let discontinued = if entry.is_discontinued {
                    self.config.discontinued_marker.as_str()
                } else {
                    "N"
                };
                count += stmt.execute(params![
                    entry.key.catalog_number,
                    entry.key.manufacturer_name,
                    entry.key.manufacturer_part_number,
                    entry.key.product_number,
                    entry.key.vendor_name,
                    entry.key.vendor_part_number,
                    entry.product_id,
                    entry.product_price_id,
                    entry.base_product_price_id,
                    discontinued,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        debug!(inserted = count, "参考条目写入完成");
        Ok(count)
    }

    /// 参考条目总数
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM product_action_review", [], |row| {
            row.get(0)
        })?;
        Ok(n as usize)
    }

    fn map_row(&self, row: &Row) -> rusqlite::Result<ReferenceEntry> {
        let discontinued_raw: Option<String> = row.get(9)?;
        Ok(ReferenceEntry {
            key: CompositeKey {
                catalog_number: row.get(0)?,
                manufacturer_name: row.get(1)?,
                manufacturer_part_number: row.get(2)?,
                product_number: row.get(3)?,
                vendor_name: row.get(4)?,
                vendor_part_number: row.get(5)?,
            },
            product_id: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
            product_price_id: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
            base_product_price_id: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
            is_discontinued: discontinued_raw
                .map(|v| self.config.is_discontinued(&v))
                .unwrap_or(false),
        })
    }
}

impl ReferenceCatalogProvider for ReferenceCatalogRepositoryImpl {
    #[instrument(skip(self))]
    fn fetch_reference_catalog(&self) -> RepositoryResult<ReferenceCatalog> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let mut stmt = conn.prepare(
            r#"
            SELECT catalog_number, manufacturer_name, manufacturer_part_number,
                   product_number, vendor_name, vendor_part_number,
                   product_id, product_price_id, base_product_price_id, is_discontinued
            FROM product_action_review
            ORDER BY entry_id
            "#,
        )?;

        let entries = stmt
            .query_map([], |row| self.map_row(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let catalog = ReferenceCatalog::new(
            entries,
            self.config.staged_base_price_sentinel.clone(),
        );
        info!(
            total = catalog.len(),
            committed = catalog.committed().len(),
            staged = catalog.staged().len(),
            "参考目录加载完成"
        );
        Ok(catalog)
    }
}
