// ==========================================
// 产品目录对账系统 - 左连接
// ==========================================
// 职责: 按匹配键把批次记录与参考条目做左连接
// 规则:
// - 一条记录命中 k 个参考条目 → 产生 k 条临时连接行（参考目录顺序）
// - 连接键列只保留一份；其余同名列加 _x（批次侧）/ _y（参考侧）后缀
// - 未命中的记录原样进入 remainder（保持输入顺序）
// ==========================================

use crate::domain::catalog::{MatchKeySet, ReferenceEntry};
use crate::domain::fields;
use crate::domain::record::Record;
use std::collections::HashMap;

/// 一条连接行: 合并后的记录 + 命中的参考条目
pub struct JoinedRow<'a> {
    pub record: Record,
    pub reference: &'a ReferenceEntry,
}

/// 连接结果
pub struct JoinOutput<'a> {
    pub matched: Vec<JoinedRow<'a>>,
    pub remainder: Vec<Record>,
}

/// 左连接
///
/// # 参数
/// - pending: 待匹配记录
/// - reference: 参考分区
/// - keys: 连接键集合
pub fn left_join<'a>(
    pending: Vec<Record>,
    reference: &[&'a ReferenceEntry],
    keys: MatchKeySet,
) -> JoinOutput<'a> {
    let mut index: HashMap<Vec<String>, Vec<&'a ReferenceEntry>> = HashMap::new();
    for entry in reference.iter().copied() {
        index.entry(keys.project_key(&entry.key)).or_default().push(entry);
    }

    let mut matched = Vec::new();
    let mut remainder = Vec::new();

    for record in pending {
        match index.get(&keys.project_record(&record)) {
            Some(entries) => {
                for entry in entries.iter().copied() {
                    matched.push(JoinedRow {
                        record: merge(&record, entry, keys),
                        reference: entry,
                    });
                }
            }
            None => remainder.push(record),
        }
    }

    JoinOutput { matched, remainder }
}

/// 合并批次记录与参考条目
fn merge(incoming: &Record, entry: &ReferenceEntry, keys: MatchKeySet) -> Record {
    let join_columns = keys.fields();
    let reference = entry.to_record();

    let mut merged = incoming.clone();
    for (column, value) in reference.iter() {
        if join_columns.contains(&column) {
            continue;
        }
        // 身份字段即使批次侧缺列也成对展开，缺失按空串比较
        if merged.contains(column) || fields::KEY_FIELDS.contains(&column) {
            let incoming_column = format!("{}{}", column, fields::INCOMING_SUFFIX);
            if merged.contains(column) {
                merged.rename(column, &incoming_column);
            } else {
                merged.set(incoming_column, "");
            }
            merged.set(format!("{}{}", column, fields::REFERENCE_SUFFIX), value);
        } else {
            merged.set(column, value);
        }
    }
    merged
}
