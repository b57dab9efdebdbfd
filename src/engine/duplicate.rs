// ==========================================
// 产品目录对账系统 - 产品号冲突判定
// ==========================================
// 职责: 合并后的记录集中，ProductNumber 出现于多个不同复合身份的记录
//       全部改判为 PossibleDuplicate
// 说明: 冲突只按 ProductNumber 判定（窄键），不看其余五个身份字段
//       同一复合身份因一对多连接产生的临时行只计一次；空 ProductNumber 不计
// ==========================================

use crate::domain::catalog::{ClassifiedRecord, CompositeKey};
use crate::domain::types::MatchLabel;
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub struct DuplicateResolver;

impl DuplicateResolver {
    pub fn new() -> Self {
        Self
    }

    /// 改判冲突记录
    ///
    /// # 返回
    /// 被改判的记录行数
    pub fn resolve(&self, records: &mut [ClassifiedRecord]) -> usize {
        let mut identities: HashMap<String, HashSet<CompositeKey>> = HashMap::new();
        for classified in records.iter() {
            let product_number = classified.key.product_number.trim();
            if product_number.is_empty() {
                continue;
            }
            identities
                .entry(product_number.to_string())
                .or_default()
                .insert(classified.key.clone());
        }

        let mut flagged = 0;
        for classified in records.iter_mut() {
            let collides = identities
                .get(classified.key.product_number.trim())
                .map(|keys| keys.len() > 1)
                .unwrap_or(false);
            if collides {
                classified.label = MatchLabel::PossibleDuplicate;
                flagged += 1;
            }
        }

        debug!(flagged, "产品号冲突判定完成");
        flagged
    }
}

impl Default for DuplicateResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Record;

    fn create_test_record(catalog: &str, product_number: &str, label: MatchLabel) -> ClassifiedRecord {
        ClassifiedRecord::new(
            Record::from_pairs([
                ("CatalogNumber", catalog),
                ("ProductNumber", product_number),
            ]),
            label,
            false,
        )
    }

    #[test]
    fn test_shared_product_number_flags_both() {
        let mut records = vec![
            create_test_record("C1", "P1", MatchLabel::New),
            create_test_record("C2", "P1", MatchLabel::Ready),
            create_test_record("C3", "P2", MatchLabel::New),
        ];

        let flagged = DuplicateResolver::new().resolve(&mut records);

        assert_eq!(flagged, 2);
        assert_eq!(records[0].label, MatchLabel::PossibleDuplicate);
        assert_eq!(records[1].label, MatchLabel::PossibleDuplicate);
        assert_eq!(records[2].label, MatchLabel::New);
    }

    #[test]
    fn test_same_identity_rows_do_not_collide() {
        let mut records = vec![
            create_test_record("C1", "P1", MatchLabel::Case(crate::domain::CaseCode::Case2)),
            create_test_record("C1", "P1", MatchLabel::Partial),
        ];

        assert_eq!(DuplicateResolver::new().resolve(&mut records), 0);
        assert_eq!(records[1].label, MatchLabel::Partial);
    }

    #[test]
    fn test_blank_product_number_ignored() {
        let mut records = vec![
            create_test_record("C1", "", MatchLabel::New),
            create_test_record("C2", " ", MatchLabel::New),
        ];

        assert_eq!(DuplicateResolver::new().resolve(&mut records), 0);
    }
}
