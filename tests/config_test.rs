// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: config_kv 读取、默认值回退、配置对参考目录分区的影响
// ==========================================


use catalog_reconcile::config::{config_keys, ConfigManager, ReconcileConfig, ReconcileConfigReader};
use catalog_reconcile::domain::catalog::ReferenceEntry;
use catalog_reconcile::repository::{ReferenceCatalogProvider, ReferenceCatalogRepositoryImpl};
use test_helpers::{create_test_db, create_test_key, insert_test_config, open_test_connection};

#[test]
fn test_config_manager_creation() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let config_manager = ConfigManager::new(&db_path);
    assert!(
        config_manager.is_ok(),
        "ConfigManager should be created successfully"
    );
}

#[test]
fn test_defaults_when_unset() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    let config = ReconcileConfig::from_reader(&config_manager).expect("config should load");

    assert_eq!(config, ReconcileConfig::default());
    assert_eq!(config.staged_base_price_sentinel, "Load Pricing");
    assert_eq!(config.write_buffer_load_limit, 50);
}

#[test]
fn test_stored_values_override_defaults() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    {
        let guard = conn.lock().unwrap();
        insert_test_config(&guard, config_keys::STAGED_BASE_PRICE_SENTINEL, "Pending Base")
            .unwrap();
        insert_test_config(&guard, config_keys::WRITE_BUFFER_LOAD_LIMIT, "7").unwrap();
    }

    let config_manager = ConfigManager::from_connection(conn).expect("ConfigManager");

    assert_eq!(
        config_manager.get_staged_base_price_sentinel().unwrap(),
        "Pending Base"
    );
    assert_eq!(config_manager.get_write_buffer_load_limit().unwrap(), 7);
}

#[test]
fn test_invalid_load_limit_falls_back() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("ConfigManager");

    config_manager
        .set_global_config_value(config_keys::WRITE_BUFFER_LOAD_LIMIT, "many")
        .unwrap();
    assert_eq!(config_manager.get_write_buffer_load_limit().unwrap(), 50);

    config_manager
        .set_global_config_value(config_keys::WRITE_BUFFER_LOAD_LIMIT, "0")
        .unwrap();
    assert_eq!(config_manager.get_write_buffer_load_limit().unwrap(), 50);
}

#[test]
fn test_snapshot_lists_stored_keys() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("ConfigManager");
    config_manager
        .set_global_config_value(config_keys::DISCONTINUED_MARKER, "X")
        .unwrap();

    let snapshot = config_manager.get_config_snapshot().unwrap();

    assert_eq!(snapshot, r#"{"discontinued_marker":"X"}"#);
}

#[test]
fn test_custom_sentinel_changes_partition() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    let config_manager = ConfigManager::from_connection(conn.clone()).expect("ConfigManager");
    config_manager
        .set_global_config_value(config_keys::STAGED_BASE_PRICE_SENTINEL, "TBD")
        .unwrap();
    let config = ReconcileConfig::from_reader(&config_manager).unwrap();

    let repo = ReferenceCatalogRepositoryImpl::from_connection(conn, &config);
    repo.insert_entries(&[
        ReferenceEntry {
            key: create_test_key("C1", "M", "MP1", "P1", "V", "VP1"),
            product_id: "1".to_string(),
            product_price_id: "PP1".to_string(),
            base_product_price_id: "TBD".to_string(),
            is_discontinued: false,
        },
        ReferenceEntry {
            key: create_test_key("C2", "M", "MP2", "P2", "V", "VP2"),
            product_id: "2".to_string(),
            product_price_id: "PP2".to_string(),
            base_product_price_id: "Load Pricing".to_string(),
            is_discontinued: false,
        },
    ])
    .unwrap();

    let catalog = repo.fetch_reference_catalog().unwrap();

    assert_eq!(catalog.staged().len(), 1);
    assert_eq!(catalog.staged()[0].key.catalog_number, "C1");
    assert_eq!(catalog.committed().len(), 1);
}
