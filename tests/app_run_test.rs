// ==========================================
// 批次文件运行入口集成测试
// ==========================================
// 测试目标: 批次文件 → app::run_file → 结果 CSV 与落库记录
// ==========================================


use catalog_reconcile::app::{run_file, RunOptions};
use catalog_reconcile::repository::SqliteRecordSink;
use catalog_reconcile::ReconcileError;
use std::path::PathBuf;
use test_helpers::{
    create_test_db, create_test_entry, create_test_key, open_test_connection,
    seed_reference_catalog,
};

const BATCH_HEADER: &str = "CatalogNumber,ManufacturerName,ManufacturerPartNumber,ProductNumber,VendorName,VendorPartNumber,ProductId,ProductPriceId,UnitOfIssue";

fn write_test_batch(dir: &tempfile::TempDir, rows: &[&str]) -> PathBuf {
    let path = dir.path().join("vendor.csv");
    let mut content = String::from(BATCH_HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    std::fs::write(&path, content).expect("write batch file");
    path
}

#[test]
fn test_run_file_exports_and_persists() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    let key = create_test_key("C1", "ACME", "MPN-1", "P1", "VendorCo", "VPN-1");
    seed_reference_catalog(conn.clone(), &[create_test_entry(key, "100")]).expect("seed catalog");

    let dir = tempfile::tempdir().unwrap();
    let input = write_test_batch(&dir, &["C1,ACME,MPN-1,P1,VendorCo,VPN-1,,,EA"]);
    let output = dir.path().join("out.csv");
    let options = RunOptions::new(input, Some(db_path), Some(output.clone()));

    let result = run_file(&options).expect("run should succeed");

    assert!(result.success);
    assert_eq!(result.message, "0 Fail, 1 Pass.");
    let record = &result.records.records()[0];
    assert_eq!(record.value("Filter"), "Ready");
    assert_eq!(record.value("ProductId"), "100");
    assert_eq!(record.value("ProductPriceId"), "PP-100");
    assert_eq!(record.value("BaseProductPriceId"), "BP-100");

    let exported = std::fs::read_to_string(&output).unwrap();
    assert!(exported.starts_with("CatalogNumber,Pass,Alert,Fail"));
    assert!(exported.contains("Ready"));

    let persisted = SqliteRecordSink::from_connection(conn, result.run_id.clone())
        .load_run(&result.run_id)
        .unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].value("ProductId"), "100");
    assert_eq!(persisted[0].value("ProductPriceId"), "PP-100");
}

#[test]
fn test_run_file_missing_input_is_import_error() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let dir = tempfile::tempdir().unwrap();
    let options = RunOptions::new(
        dir.path().join("missing.csv"),
        Some(db_path),
        Some(dir.path().join("out.csv")),
    );

    let err = run_file(&options).unwrap_err();

    assert!(matches!(err, ReconcileError::Import(_)));
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn test_run_file_unopenable_database_is_other_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_test_batch(&dir, &["C1,ACME,MPN-1,P1,VendorCo,VPN-1,,,EA"]);
    let db_path = dir.path().join("no-such-dir").join("catalog.db");
    let options = RunOptions::new(
        input,
        Some(db_path.to_string_lossy().to_string()),
        Some(dir.path().join("out.csv")),
    );

    let err = run_file(&options).unwrap_err();

    assert!(matches!(err, ReconcileError::Other(_)));
    assert!(err.to_string().contains("无法打开数据库"));
}

#[test]
fn test_run_file_broken_config_table_is_config_error() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    {
        let conn = open_test_connection(&db_path).expect("Failed to open db");
        let conn = conn.lock().unwrap();
        conn.execute_batch(
            "DROP TABLE config_kv; CREATE TABLE config_kv (scope_id TEXT NOT NULL, key TEXT NOT NULL);",
        )
        .unwrap();
    }
    let dir = tempfile::tempdir().unwrap();
    let input = write_test_batch(&dir, &["C1,ACME,MPN-1,P1,VendorCo,VPN-1,,,EA"]);
    let options = RunOptions::new(input, Some(db_path), Some(dir.path().join("out.csv")));

    let err = run_file(&options).unwrap_err();

    assert!(matches!(err, ReconcileError::Config(_)));
}
