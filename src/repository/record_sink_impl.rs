// ==========================================
// 产品目录对账系统 - 对账结果落库实现
// ==========================================
// 职责: 将已分类记录以 JSON 行写入 reconciled_record 表
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::fields;
use crate::domain::record::Record;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::write_buffer::RecordSink;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// SqliteRecordSink
// ==========================================
pub struct SqliteRecordSink {
    conn: Arc<Mutex<Connection>>,
    run_id: String,
}

impl SqliteRecordSink {
    /// # 参数
    /// - db_path: 数据库文件路径
    /// - run_id: 批处理运行标识（同一批次写入同一 run_id）
    pub fn new(db_path: &str, run_id: impl Into<String>) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self::from_connection(Arc::new(Mutex::new(conn)), run_id))
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>, run_id: impl Into<String>) -> Self {
        Self {
            conn,
            run_id: run_id.into(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// 读取指定 run 的落库记录（按写入顺序）
    pub fn load_run(&self, run_id: &str) -> RepositoryResult<Vec<Record>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let mut stmt = conn.prepare(
            "SELECT payload_json FROM reconciled_record WHERE run_id = ?1 ORDER BY rowid",
        )?;
        let payloads = stmt
            .query_map(params![run_id], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut records = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&payload)?;
            records.push(Record::from_pairs(map.into_iter().map(|(k, v)| {
                let value = match v {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, value)
            })));
        }
        Ok(records)
    }
}

impl RecordSink for SqliteRecordSink {
    fn write_batch(&mut self, records: &[Record]) -> RepositoryResult<usize> {
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
                INSERT INTO reconciled_record (
                    record_id, run_id, filter, take_priority, payload_json, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;

            let created_at = Utc::now().to_rfc3339();
            for record in records {
                let payload = serde_json::to_string(&record.to_json())?;
                count += stmt.execute(params![
                    Uuid::new_v4().to_string(),
                    self.run_id,
                    record.get(fields::FILTER),
                    record.get(fields::TAKE_PRIORITY),
                    payload,
                    created_at,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;

    #[test]
    fn test_write_batch_round_trips_payload() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        let mut sink = SqliteRecordSink::from_connection(Arc::new(Mutex::new(conn)), "run-1");

        let records = vec![
            Record::from_pairs([("ProductNumber", "P1"), ("Filter", "Ready"), ("TakePriority", "A")]),
            Record::from_pairs([("ProductNumber", "P2"), ("Filter", "New"), ("TakePriority", "D")]),
        ];
        assert_eq!(sink.write_batch(&records).unwrap(), 2);

        let loaded = sink.load_run("run-1").unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].value("ProductNumber"), "P1");
        assert_eq!(loaded[1].value("TakePriority"), "D");
        assert!(sink.load_run("other").unwrap().is_empty());
    }

    #[test]
    fn test_load_run_keeps_column_order() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        let mut sink = SqliteRecordSink::from_connection(Arc::new(Mutex::new(conn)), "run-1");

        let record = Record::from_pairs([
            ("VendorPartNumber", "VP1"),
            ("CatalogNumber", "C1"),
            ("Filter", "Ready"),
            ("Alert", "Default UOI"),
        ]);
        sink.write_batch(&[record]).unwrap();

        let loaded = sink.load_run("run-1").unwrap();
        assert_eq!(
            loaded[0].columns().collect::<Vec<_>>(),
            vec!["VendorPartNumber", "CatalogNumber", "Filter", "Alert"]
        );
    }
}
