// ==========================================
// 产品目录对账系统 - 字段名常量
// ==========================================
// 职责: 集中定义批次文件 / 参考目录 / 报告列的列名
// 红线: 列名区分大小写，与导入文件表头逐字一致
// ==========================================

// ===== 复合身份键字段（顺序即排序顺序）=====
pub const CATALOG_NUMBER: &str = "CatalogNumber";
pub const MANUFACTURER_NAME: &str = "ManufacturerName";
pub const MANUFACTURER_PART_NUMBER: &str = "ManufacturerPartNumber";
pub const PRODUCT_NUMBER: &str = "ProductNumber";
pub const VENDOR_NAME: &str = "VendorName";
pub const VENDOR_PART_NUMBER: &str = "VendorPartNumber";

// ===== 参考目录标识字段 =====
pub const PRODUCT_ID: &str = "ProductId";
pub const PRODUCT_PRICE_ID: &str = "ProductPriceId";
pub const BASE_PRODUCT_PRICE_ID: &str = "BaseProductPriceId";
pub const DB_IS_DISCONTINUED: &str = "db_IsDiscontinued";

// ===== 分类输出字段 =====
pub const FILTER: &str = "Filter";
pub const TAKE_PRIORITY: &str = "TakePriority";

// ===== 报告三通道 =====
pub const PASS: &str = "Pass";
pub const ALERT: &str = "Alert";
pub const FAIL: &str = "Fail";

/// 批次级可行性失败时附加的列
pub const MISSING_HEADERS: &str = "Missing Headers";

// ===== 产品属性 =====
pub const UNIT_OF_ISSUE: &str = "UnitOfIssue";
pub const UNIT_OF_ISSUE_QUANTITY: &str = "UnitOfIssueQuantity";
/// 制造商目录号前缀（缺失 CatalogNumber 时用于拼装）
pub const MANUFACTURER_PREFIX: &str = "ManufacturerPrefix";

// ===== 连接后缀 =====
pub const INCOMING_SUFFIX: &str = "_x";
pub const REFERENCE_SUFFIX: &str = "_y";

/// 复合身份键的六个字段（声明顺序）
pub const KEY_FIELDS: [&str; 6] = [
    CATALOG_NUMBER,
    MANUFACTURER_NAME,
    MANUFACTURER_PART_NUMBER,
    PRODUCT_NUMBER,
    VENDOR_NAME,
    VENDOR_PART_NUMBER,
];

/// 匹配后由参考目录带出的标识字段
pub const REFERENCE_ID_FIELDS: [&str; 4] = [
    PRODUCT_ID,
    PRODUCT_PRICE_ID,
    BASE_PRODUCT_PRICE_ID,
    DB_IS_DISCONTINUED,
];

/// 只能由参考目录提供的字段，进入第 1 轮前从批次记录中剔除
pub const REFERENCE_OWNED_FIELDS: [&str; 2] = [BASE_PRODUCT_PRICE_ID, DB_IS_DISCONTINUED];

/// 报告三通道列（插入位置 1/2/3）
pub const REPORT_FIELDS: [&str; 3] = [PASS, ALERT, FAIL];
