// ==========================================
// 对账引擎集成测试
// ==========================================
// 测试目标: SQLite 参考目录 → 匹配级联 → 目录复核转换器 → 写入缓冲落库
// ==========================================


use catalog_reconcile::config::ReconcileConfig;
use catalog_reconcile::domain::record::{Record, RecordSet};
use catalog_reconcile::engine::ReconcileOrchestrator;
use catalog_reconcile::importer::catalog_review::DUPLICATE_REVIEW_MESSAGE;
use catalog_reconcile::importer::CatalogReviewTransformer;
use catalog_reconcile::repository::{ReferenceCatalogRepositoryImpl, SqliteRecordSink};
use std::sync::{Arc, Mutex};
use test_helpers::{
    create_staged_entry, create_test_db, create_test_entry, create_test_key, create_test_record,
    find_by_catalog, open_test_connection, seed_reference_catalog,
};

struct TestContext {
    _temp_file: tempfile::NamedTempFile,
    conn: Arc<Mutex<rusqlite::Connection>>,
}

fn create_test_context(entries: &[catalog_reconcile::ReferenceEntry]) -> TestContext {
    let (temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    seed_reference_catalog(conn.clone(), entries).expect("Failed to seed catalog");
    TestContext {
        _temp_file: temp_file,
        conn,
    }
}

/// 运行一个批次，返回结果与落库记录
fn run_test_batch(
    ctx: &TestContext,
    records: Vec<Record>,
    load_limit: usize,
) -> (catalog_reconcile::BatchResult, Vec<Record>) {
    let config = ReconcileConfig::default();
    let provider = Arc::new(ReferenceCatalogRepositoryImpl::from_connection(
        ctx.conn.clone(),
        &config,
    ));
    let sink = SqliteRecordSink::from_connection(ctx.conn.clone(), "run-test");
    let mut transformer = CatalogReviewTransformer::new(sink, load_limit);
    let orchestrator = ReconcileOrchestrator::new(provider, config);

    let result = orchestrator
        .run_batch_with_id(
            "run-test".to_string(),
            RecordSet::from_records(records),
            &mut transformer,
        )
        .expect("batch should run");

    let persisted = transformer
        .into_sink()
        .load_run(&result.run_id)
        .expect("load persisted records");
    (result, persisted)
}

#[test]
fn test_committed_match_is_ready_and_persisted() {
    let key = create_test_key("C1", "ACME", "MPN-1", "P1", "VendorCo", "VPN-1");
    let ctx = create_test_context(&[create_test_entry(key.clone(), "100")]);

    let (result, persisted) = run_test_batch(&ctx, vec![create_test_record(&key)], 50);

    assert!(result.success);
    assert_eq!(result.message, "0 Fail, 1 Pass.");
    assert_eq!(result.run_id, "run-test");
    assert_eq!(result.records.len(), 1);

    let record = &result.records.records()[0];
    assert_eq!(record.value("Filter"), "Ready");
    assert_eq!(record.value("TakePriority"), "A");
    assert_eq!(record.value("ProductId"), "100");
    assert_eq!(record.value("Alert"), "Ready to update/contract; Default UOI");
    assert_eq!(record.value("Pass"), "Passed Line Viability; Success at exit");
    assert_eq!(record.value("Fail"), "");

    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].value("UnitOfIssue"), "EA");
    assert_eq!(persisted[0].value("Filter"), "Ready");
}

#[test]
fn test_report_columns_follow_first_column() {
    let key = create_test_key("C1", "ACME", "MPN-1", "P1", "VendorCo", "VPN-1");
    let ctx = create_test_context(&[]);

    let (result, _) = run_test_batch(&ctx, vec![create_test_record(&key)], 50);

    let columns = result.records.columns();
    assert_eq!(columns[0], "CatalogNumber");
    assert_eq!(&columns[1..4], &["Pass", "Alert", "Fail"]);
    assert!(result.records.has_column("Filter"));
    assert!(result.records.has_column("TakePriority"));
}

#[test]
fn test_shared_product_number_fails_review() {
    let a = create_test_key("C1", "ACME", "M1", "P1", "V", "VP1");
    let b = create_test_key("C2", "ACME", "M2", "P1", "V", "VP2");
    let ctx = create_test_context(&[]);

    let (result, persisted) =
        run_test_batch(&ctx, vec![create_test_record(&a), create_test_record(&b)], 50);

    assert!(!result.success);
    assert_eq!(result.message, "2 Fail, 0 Pass.");
    for record in result.records.records() {
        assert_eq!(record.value("Filter"), "Possible Duplicate");
        assert_eq!(record.value("TakePriority"), "Z");
        assert!(record.value("Fail").contains(DUPLICATE_REVIEW_MESSAGE));
        assert!(record.value("Fail").ends_with("Failed at exit"));
    }
    assert!(persisted.is_empty());
}

#[test]
fn test_unmatched_record_is_new() {
    let known = create_test_key("C1", "ACME", "MPN-1", "P1", "VendorCo", "VPN-1");
    let stranger = create_test_key("C9", "Other", "X", "P9", "V9", "Y");
    let ctx = create_test_context(&[create_test_entry(known, "100")]);

    let mut record = create_test_record(&stranger);
    record.set("UnitOfIssue", "Boxes");
    let (result, persisted) = run_test_batch(&ctx, vec![record], 50);

    let record = &result.records.records()[0];
    assert_eq!(record.value("Filter"), "New");
    assert_eq!(record.value("TakePriority"), "D");
    assert_eq!(record.value("Alert"), "New product");
    assert_eq!(record.value("UnitOfIssue"), "BX");
    assert_eq!(persisted.len(), 1);
}

#[test]
fn test_staged_entries_split_by_product_price() {
    let priced = create_test_key("C1", "ACME", "M1", "P1", "V", "VP1");
    let pending = create_test_key("C2", "ACME", "M2", "P2", "V", "VP2");
    let ctx = create_test_context(&[
        create_staged_entry(priced.clone(), "PP-7"),
        create_staged_entry(pending.clone(), "Load Product Price"),
    ]);

    let (result, _) = run_test_batch(
        &ctx,
        vec![create_test_record(&pending), create_test_record(&priced)],
        50,
    );

    let records = result.records.records();
    let base = find_by_catalog(records, "C1");
    assert_eq!(base.value("Filter"), "Base Pricing");
    assert_eq!(base.value("TakePriority"), "B");

    let partial = find_by_catalog(records, "C2");
    assert_eq!(partial.value("Filter"), "Partial");
    assert_eq!(partial.value("TakePriority"), "C");
}

#[test]
fn test_discontinued_reference_appends_alert() {
    let key = create_test_key("C1", "ACME", "MPN-1", "P1", "VendorCo", "VPN-1");
    let mut entry = create_test_entry(key.clone(), "100");
    entry.is_discontinued = true;
    let ctx = create_test_context(&[entry]);

    let mut record = create_test_record(&key);
    record.set("UnitOfIssue", "EA");
    let (result, _) = run_test_batch(&ctx, vec![record], 50);

    let record = &result.records.records()[0];
    assert_eq!(record.value("Filter"), "Ready");
    assert_eq!(
        record.value("Alert"),
        "Ready to update/contract; This product is currently discontinued"
    );
}

#[test]
fn test_record_missing_required_value_fails_line() {
    let good = create_test_key("C1", "ACME", "M1", "P1", "V", "VP1");
    let blank_vendor = create_test_key("C2", "ACME", "M2", "P2", "", "VP2");
    let ctx = create_test_context(&[]);

    let (result, persisted) = run_test_batch(
        &ctx,
        vec![create_test_record(&good), create_test_record(&blank_vendor)],
        50,
    );

    assert!(result.success);
    assert_eq!(result.message, "1 Fail, 1 Pass.");
    let failed = find_by_catalog(result.records.records(), "C2");
    assert_eq!(
        failed.value("Fail"),
        "Failed Line Viability; Missing Data: VendorName."
    );
    assert_eq!(persisted.len(), 1);
}

#[test]
fn test_missing_headers_short_circuits() {
    let ctx = create_test_context(&[]);
    let record = Record::from_pairs([("CatalogNumber", "C1"), ("VendorName", "V")]);

    let (result, persisted) = run_test_batch(&ctx, vec![record], 50);

    assert!(!result.success);
    assert_eq!(
        result.message,
        "The file is missing a product field: VendorPartNumber"
    );
    assert_eq!(
        result.records.records()[0].value("Missing Headers"),
        "VendorPartNumber"
    );
    assert!(persisted.is_empty());
}

#[test]
fn test_write_buffer_flushes_in_batches() {
    let ctx = create_test_context(&[]);
    let records: Vec<Record> = (1..=5)
        .map(|i| {
            create_test_record(&create_test_key(
                &format!("C{}", i),
                "ACME",
                &format!("M{}", i),
                &format!("P{}", i),
                "V",
                &format!("VP{}", i),
            ))
        })
        .collect();

    let (result, persisted) = run_test_batch(&ctx, records, 2);

    assert_eq!(result.message, "0 Fail, 5 Pass.");
    assert_eq!(persisted.len(), 5);
}

#[test]
fn test_blank_batch_identifiers_take_reference_values() {
    let key = create_test_key("C1", "ACME", "MPN-1", "P1", "VendorCo", "VPN-1");
    let ctx = create_test_context(&[create_test_entry(key.clone(), "100")]);

    let mut record = create_test_record(&key);
    record.set("ProductId", "");
    record.set("ProductPriceId", "");
    let (result, persisted) = run_test_batch(&ctx, vec![record], 50);

    let record = &result.records.records()[0];
    assert_eq!(record.value("Filter"), "Ready");
    assert_eq!(record.value("ProductId"), "100");
    assert_eq!(record.value("ProductPriceId"), "PP-100");
    assert_eq!(record.value("BaseProductPriceId"), "BP-100");
    assert_eq!(persisted[0].value("ProductId"), "100");
}

#[test]
fn test_missing_catalog_number_built_from_prefix() {
    let ctx = create_test_context(&[]);
    let record = Record::from_pairs([
        ("ManufacturerPrefix", "FSB"),
        ("ManufacturerName", "ACME"),
        ("ManufacturerPartNumber", "ab-7"),
        ("VendorName", "V"),
        ("VendorPartNumber", "VP7"),
        ("UnitOfIssue", "cases"),
    ]);

    let (result, persisted) = run_test_batch(&ctx, vec![record], 50);

    assert!(result.success);
    let record = &result.records.records()[0];
    assert_eq!(record.value("CatalogNumber"), "FSB-AB7");
    assert_eq!(record.value("ProductNumber"), "FSB-AB7 CS");
    assert_eq!(record.value("Filter"), "New");
    assert_eq!(record.value("UnitOfIssue"), "CS");
    assert_eq!(persisted.len(), 1);
}
