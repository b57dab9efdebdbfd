// ==========================================
// 产品目录对账系统 - 连接列合并
// ==========================================
// 职责: 连接产生的 <a>_x / <a>_y 成对列折叠为单列 <a>
// 规则: 默认保留批次侧（_x）值，删除两个后缀列
//       参考标识字段以参考侧非空值为准
// 性质: 幂等；无后缀列的记录原样返回
// ==========================================

use crate::domain::fields;
use crate::domain::record::Record;

pub struct ColumnReconciler {
    attributes: Vec<String>,
    reference_preferred: Vec<String>,
}

impl ColumnReconciler {
    /// # 参数
    /// - attributes: 需要合并的属性名（不含后缀）
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
            reference_preferred: Vec::new(),
        }
    }

    /// 指定以参考侧值为准的属性（参考侧为空时仍保留批次值）
    pub fn with_reference_preferred<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reference_preferred = attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// 合并单条记录
    pub fn reconcile(&self, record: &mut Record) {
        for attribute in &self.attributes {
            let incoming = format!("{}{}", attribute, fields::INCOMING_SUFFIX);
            let reference = format!("{}{}", attribute, fields::REFERENCE_SUFFIX);

            if !record.contains(&incoming) && !record.contains(&reference) {
                continue;
            }

            let reference_value = record
                .get(&reference)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string);

            if record.contains(&incoming) {
                record.rename(&incoming, attribute);
            } else if !record.contains(attribute) {
                record.set(attribute.as_str(), "");
            }

            if let Some(value) = reference_value {
                if self.reference_preferred.iter().any(|a| a == attribute) {
                    record.set(attribute.as_str(), value);
                }
            }
            record.remove(&reference);
        }
    }
}

impl Default for ColumnReconciler {
    /// 六个身份字段 + 参考目录标识字段（标识字段取参考侧）
    fn default() -> Self {
        Self::new(
            fields::KEY_FIELDS
                .iter()
                .chain(fields::REFERENCE_ID_FIELDS.iter())
                .copied(),
        )
        .with_reference_preferred(fields::REFERENCE_ID_FIELDS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_incoming_value() {
        let reconciler = ColumnReconciler::new(["VendorName"]);
        let mut record = Record::from_pairs([
            ("CatalogNumber", "C1"),
            ("VendorName_x", "NewVendor"),
            ("VendorName_y", "OldVendor"),
        ]);

        reconciler.reconcile(&mut record);

        assert_eq!(record.value("VendorName"), "NewVendor");
        assert!(!record.contains("VendorName_x"));
        assert!(!record.contains("VendorName_y"));
    }

    #[test]
    fn test_is_idempotent() {
        let reconciler = ColumnReconciler::default();
        let mut record = Record::from_pairs([
            ("ProductNumber_x", "P1"),
            ("ProductNumber_y", "P9"),
            ("Other", "o"),
        ]);

        reconciler.reconcile(&mut record);
        let once = record.clone();
        reconciler.reconcile(&mut record);

        assert_eq!(record, once);
        assert_eq!(record.value("ProductNumber"), "P1");
    }

    #[test]
    fn test_no_suffix_is_noop() {
        let reconciler = ColumnReconciler::default();
        let mut record = Record::from_pairs([("CatalogNumber", "C1"), ("ProductId", "7")]);
        let before = record.clone();

        reconciler.reconcile(&mut record);

        assert_eq!(record, before);
    }

    #[test]
    fn test_reference_only_side_keeps_existing_column() {
        let reconciler = ColumnReconciler::new(["ProductId"]);
        let mut record = Record::from_pairs([("ProductId", "5"), ("ProductId_y", "9")]);

        reconciler.reconcile(&mut record);

        assert_eq!(record.value("ProductId"), "5");
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_blank_batch_identifier_takes_reference_value() {
        let reconciler = ColumnReconciler::default();
        let mut record = Record::from_pairs([
            ("CatalogNumber", "C1"),
            ("ProductId_x", ""),
            ("ProductId_y", "100"),
            ("ProductPriceId", ""),
            ("ProductPriceId_y", "200"),
        ]);

        reconciler.reconcile(&mut record);

        assert_eq!(record.value("ProductId"), "100");
        assert_eq!(record.value("ProductPriceId"), "200");
        assert_eq!(
            record.columns().collect::<Vec<_>>(),
            vec!["CatalogNumber", "ProductId", "ProductPriceId"]
        );
    }

    #[test]
    fn test_blank_reference_identifier_keeps_batch_value() {
        let reconciler = ColumnReconciler::default();
        let mut record = Record::from_pairs([("ProductId_x", "5"), ("ProductId_y", " ")]);

        reconciler.reconcile(&mut record);

        assert_eq!(record.value("ProductId"), "5");
        assert_eq!(record.len(), 1);
    }
}
