// ==========================================
// 产品目录对账系统 - 优先级排序
// ==========================================
// 职责: 为已分类记录写入 Filter / TakePriority / Alert，按复合身份去重并排序
// 输入: 按 第1轮, 第2轮, 第3轮, 第4轮, New 顺序拼接的已分类记录
// 输出: 按 (复合身份, 优先级) 升序的记录
// ==========================================
// 红线: 去重保留拼接顺序中的第一条；排序稳定
// ==========================================

use crate::domain::catalog::{ClassifiedRecord, CompositeKey};
use crate::domain::fields;
use crate::domain::record::Record;
use crate::domain::types::PriorityCode;
use crate::engine::predicate::resolve;
use std::collections::HashSet;

/// 匹配到停用参考条目时追加的提示
pub const DISCONTINUED_ALERT: &str = "This product is currently discontinued";

/// 排序后的单条结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRecord {
    pub key: CompositeKey,
    pub priority: PriorityCode,
    pub record: Record,
}

// ==========================================
// PriorityRanker - 优先级排序引擎
// ==========================================
pub struct PriorityRanker {
    // 无状态引擎,不需要注入依赖
}

impl PriorityRanker {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 标注、去重、排序
    ///
    /// 步骤:
    /// 1) resolve 折叠标签，写入 Filter / TakePriority / Alert
    /// 2) 按复合身份去重，保留第一次出现
    /// 3) 按 (复合身份, 优先级) 稳定排序
    pub fn rank(&self, records: Vec<ClassifiedRecord>) -> Vec<RankedRecord> {
        // === 步骤 1: 标注 ===
        let annotated = records.into_iter().map(|classified| {
            let resolution = resolve(classified.label);
            let mut record = classified.record;

            record.set(fields::FILTER, resolution.filter);
            record.set(fields::TAKE_PRIORITY, resolution.priority.as_str());
            record.set(fields::ALERT, Self::alert_text(resolution.alert, classified.discontinued));

            RankedRecord {
                key: classified.key,
                priority: resolution.priority,
                record,
            }
        });

        // === 步骤 2: 去重 ===
        let mut seen: HashSet<CompositeKey> = HashSet::new();
        let mut ranked: Vec<RankedRecord> = annotated
            .filter(|r| seen.insert(r.key.clone()))
            .collect();

        // === 步骤 3: 稳定排序 ===
        ranked.sort_by(|a, b| a.key.cmp(&b.key).then(a.priority.cmp(&b.priority)));
        ranked
    }

    fn alert_text(alert: &str, discontinued: bool) -> String {
        if discontinued {
            format!("{}; {}", alert, DISCONTINUED_ALERT)
        } else {
            alert.to_string()
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for PriorityRanker {
    fn default() -> Self {
        Self::new()
    }
}
