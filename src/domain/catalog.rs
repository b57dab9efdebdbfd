// ==========================================
// 产品目录对账系统 - 参考目录领域模型
// ==========================================
// 职责: 复合身份键 / 匹配键集合 / 参考条目 / 参考目录快照 / 已分类记录
// 红线: 参考目录在一次批处理内只读
// ==========================================

use crate::domain::fields;
use crate::domain::record::Record;
use crate::domain::types::MatchLabel;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ==========================================
// CompositeKey - 复合身份键
// ==========================================
// 字段声明顺序即排序顺序；空值排在非空值之后
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeKey {
    pub catalog_number: String,
    pub manufacturer_name: String,
    pub manufacturer_part_number: String,
    pub product_number: String,
    pub vendor_name: String,
    pub vendor_part_number: String,
}

impl CompositeKey {
    /// 从记录读取六个键字段，缺失字段读为空串
    pub fn from_record(record: &Record) -> Self {
        Self {
            catalog_number: record.value(fields::CATALOG_NUMBER).to_string(),
            manufacturer_name: record.value(fields::MANUFACTURER_NAME).to_string(),
            manufacturer_part_number: record.value(fields::MANUFACTURER_PART_NUMBER).to_string(),
            product_number: record.value(fields::PRODUCT_NUMBER).to_string(),
            vendor_name: record.value(fields::VENDOR_NAME).to_string(),
            vendor_part_number: record.value(fields::VENDOR_PART_NUMBER).to_string(),
        }
    }

    fn sort_fields(&self) -> [&str; 6] {
        [
            self.catalog_number.as_str(),
            self.manufacturer_name.as_str(),
            self.manufacturer_part_number.as_str(),
            self.product_number.as_str(),
            self.vendor_name.as_str(),
            self.vendor_part_number.as_str(),
        ]
    }

    /// 按字段名取值
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            fields::CATALOG_NUMBER => Some(&self.catalog_number),
            fields::MANUFACTURER_NAME => Some(&self.manufacturer_name),
            fields::MANUFACTURER_PART_NUMBER => Some(&self.manufacturer_part_number),
            fields::PRODUCT_NUMBER => Some(&self.product_number),
            fields::VENDOR_NAME => Some(&self.vendor_name),
            fields::VENDOR_PART_NUMBER => Some(&self.vendor_part_number),
            _ => None,
        }
    }
}

/// 空串视为缺失值，排在最后
fn cmp_blank_last(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

impl Ord for CompositeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_fields()
            .iter()
            .zip(other.sort_fields().iter())
            .map(|(a, b)| cmp_blank_last(a, b))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for CompositeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ==========================================
// MatchKeySet - 级联各轮的连接键
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKeySet {
    /// 六字段全键（第 1、2 轮）
    Full,
    /// (CatalogNumber, ManufacturerPartNumber)（第 3 轮）
    CatalogManufacturerPart,
    /// (CatalogNumber, ManufacturerName)（第 4 轮）
    CatalogManufacturerName,
}

impl MatchKeySet {
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            MatchKeySet::Full => &fields::KEY_FIELDS,
            MatchKeySet::CatalogManufacturerPart => {
                &[fields::CATALOG_NUMBER, fields::MANUFACTURER_PART_NUMBER]
            }
            MatchKeySet::CatalogManufacturerName => {
                &[fields::CATALOG_NUMBER, fields::MANUFACTURER_NAME]
            }
        }
    }

    /// 投影记录上的连接键值
    pub fn project_record(&self, record: &Record) -> Vec<String> {
        self.fields()
            .iter()
            .map(|f| record.value(f).to_string())
            .collect()
    }

    /// 投影参考条目上的连接键值
    pub fn project_key(&self, key: &CompositeKey) -> Vec<String> {
        self.fields()
            .iter()
            .map(|f| key.field(f).unwrap_or("").to_string())
            .collect()
    }
}

// ==========================================
// ReferenceEntry - 参考目录条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub key: CompositeKey,
    pub product_id: String,
    pub product_price_id: String,
    pub base_product_price_id: String,
    pub is_discontinued: bool,
}

impl ReferenceEntry {
    /// 展开为记录（六个键字段 + 四个标识字段）
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        for name in fields::KEY_FIELDS {
            record.set(name, self.key.field(name).unwrap_or(""));
        }
        record.set(fields::PRODUCT_ID, self.product_id.as_str());
        record.set(fields::PRODUCT_PRICE_ID, self.product_price_id.as_str());
        record.set(fields::BASE_PRODUCT_PRICE_ID, self.base_product_price_id.as_str());
        record.set(
            fields::DB_IS_DISCONTINUED,
            if self.is_discontinued { "Y" } else { "N" },
        );
        record
    }
}

// ==========================================
// ReferenceCatalog - 参考目录快照
// ==========================================
// committed: BaseProductPriceId != 待定价哨兵
// staged:    BaseProductPriceId == 待定价哨兵
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    entries: Vec<ReferenceEntry>,
    staged_sentinel: String,
}

impl ReferenceCatalog {
    /// # 参数
    /// - entries: 参考条目
    /// - staged_sentinel: BaseProductPriceId 的待定价哨兵值
    pub fn new(entries: Vec<ReferenceEntry>, staged_sentinel: impl Into<String>) -> Self {
        Self {
            entries,
            staged_sentinel: staged_sentinel.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_staged(&self, entry: &ReferenceEntry) -> bool {
        entry.base_product_price_id == self.staged_sentinel
    }

    /// 已提交分区
    pub fn committed(&self) -> Vec<&ReferenceEntry> {
        self.entries.iter().filter(|e| !self.is_staged(e)).collect()
    }

    /// 待定价分区
    pub fn staged(&self) -> Vec<&ReferenceEntry> {
        self.entries.iter().filter(|e| self.is_staged(e)).collect()
    }

    /// 全量（第 3、4 轮使用）
    pub fn all(&self) -> Vec<&ReferenceEntry> {
        self.entries.iter().collect()
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn staged_sentinel(&self) -> &str {
        &self.staged_sentinel
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ==========================================
// ClassifiedRecord - 级联输出的已分类记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRecord {
    pub record: Record,
    pub key: CompositeKey,
    pub label: MatchLabel,
    /// 匹配到的参考条目已停用
    pub discontinued: bool,
}

impl ClassifiedRecord {
    pub fn new(record: Record, label: MatchLabel, discontinued: bool) -> Self {
        let key = CompositeKey::from_record(&record);
        Self {
            record,
            key,
            label,
            discontinued,
        }
    }
}
