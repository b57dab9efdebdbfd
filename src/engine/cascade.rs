// ==========================================
// 产品目录对账系统 - 匹配级联引擎
// ==========================================
// 职责: 批次记录与参考目录按顺序做四轮连接，给每条记录唯一分类
// 流程:
// 1) 第 1 轮: 六字段全键 × 已提交分区 → Ready
// 2) 第 2 轮: 六字段全键 × 待定价分区 → BasePricing / Partial
// 3) 第 3 轮: (CatalogNumber, ManufacturerPartNumber) × 全量 → 制造商/供应商规则集
// 4) 第 4 轮: (CatalogNumber, ManufacturerName) × 全量 → 目录规则集；未命中 → New
// 5) 按 第1轮, 第2轮, 第3轮, 第4轮, New 顺序拼接 → 产品号冲突判定 → 优先级排序
// ==========================================
// 红线: 每轮是纯阶段 (pending, reference) → (matched, remainder)，参考目录只读
// ==========================================

mod join;


use crate::config::ReconcileConfig;
use crate::domain::catalog::{ClassifiedRecord, MatchKeySet, ReferenceCatalog, ReferenceEntry};
use crate::domain::fields;
use crate::domain::record::{Record, RecordSet};
use crate::domain::types::MatchLabel;
use crate::engine::column_reconciler::ColumnReconciler;
use crate::engine::duplicate::DuplicateResolver;
use crate::engine::predicate::{AttributeEquality, RuleSet};
use crate::engine::priority::PriorityRanker;
use join::{left_join, JoinedRow};
use tracing::{debug, info, instrument};

/// 单轮输出
#[derive(Debug, Default)]
pub struct RoundOutput {
    pub matched: Vec<ClassifiedRecord>,
    pub remainder: Vec<Record>,
}

// ==========================================
// MatchCascade - 匹配级联引擎
// ==========================================
pub struct MatchCascade {
    pending_product_price_sentinel: String,
    reconciler: ColumnReconciler,
    duplicate_resolver: DuplicateResolver,
    ranker: PriorityRanker,
}

impl MatchCascade {
    /// # 参数
    /// - config: 提供第 2 轮使用的记录价格待定哨兵
    pub fn new(config: &ReconcileConfig) -> Self {
        Self {
            pending_product_price_sentinel: config.pending_product_price_sentinel.clone(),
            reconciler: ColumnReconciler::default(),
            duplicate_resolver: DuplicateResolver::new(),
            ranker: PriorityRanker::new(),
        }
    }

    // ==========================================
    // 主入口
    // ==========================================

    /// 完整对账: 四轮级联 + 冲突判定 + 优先级排序
    ///
    /// # 返回
    /// 记录集，列顺序为 批次列 → 参考标识列 → Filter / TakePriority / Alert
    #[instrument(skip(self, batch, catalog), fields(records = batch.len(), reference = catalog.len()))]
    pub fn reconcile(&self, batch: &RecordSet, catalog: &ReferenceCatalog) -> RecordSet {
        let mut classified = self.classify(batch.records().to_vec(), catalog);

        let flagged = self.duplicate_resolver.resolve(&mut classified);
        let ranked = self.ranker.rank(classified);

        let mut output = RecordSet::new(
            batch
                .columns()
                .iter()
                .map(String::as_str)
                .filter(|c| !fields::REFERENCE_OWNED_FIELDS.contains(c)),
        );
        for column in fields::REFERENCE_ID_FIELDS {
            output.add_column(column);
        }
        for column in [fields::FILTER, fields::TAKE_PRIORITY, fields::ALERT] {
            output.add_column(column);
        }
        for ranked_record in ranked {
            output.push(ranked_record.record);
        }

        info!(
            input = batch.len(),
            output = output.len(),
            possible_duplicates = flagged,
            "对账级联完成"
        );
        output
    }

    /// 四轮级联，按轮次顺序拼接结果（冲突判定之前）
    pub fn classify(&self, records: Vec<Record>, catalog: &ReferenceCatalog) -> Vec<ClassifiedRecord> {
        let pending: Vec<Record> = records
            .into_iter()
            .map(|mut record| {
                for column in fields::REFERENCE_OWNED_FIELDS {
                    record.remove(column);
                }
                record
            })
            .collect();

        let round1 = self.round_committed(pending, catalog);
        let round2 = self.round_staged(round1.remainder, catalog);
        let round3 = self.round_catalog_part(round2.remainder, catalog);
        let round4 = self.round_catalog_name(round3.remainder, catalog);

        let new_records: Vec<ClassifiedRecord> = round4
            .remainder
            .into_iter()
            .map(|record| ClassifiedRecord::new(record, MatchLabel::New, false))
            .collect();

        debug!(
            round1 = round1.matched.len(),
            round2 = round2.matched.len(),
            round3 = round3.matched.len(),
            round4 = round4.matched.len(),
            new = new_records.len(),
            "级联各轮匹配数"
        );

        let mut merged = round1.matched;
        merged.extend(round2.matched);
        merged.extend(round3.matched);
        merged.extend(round4.matched);
        merged.extend(new_records);
        merged
    }

    // ==========================================
    // 各轮
    // ==========================================

    /// 第 1 轮: 全键 × 已提交分区 → Ready
    pub fn round_committed(&self, pending: Vec<Record>, catalog: &ReferenceCatalog) -> RoundOutput {
        let reference = catalog.committed();
        if pending.is_empty() || reference.is_empty() {
            return Self::skipped(pending);
        }

        let joined = left_join(pending, &reference, MatchKeySet::Full);
        RoundOutput {
            matched: joined
                .matched
                .into_iter()
                .map(|row| self.finish_row(row, |_, _| MatchLabel::Ready))
                .collect(),
            remainder: joined.remainder,
        }
    }

    /// 第 2 轮: 全键 × 待定价分区
    ///
    /// 参考侧 ProductPriceId 等于记录价格待定哨兵 → Partial，否则 BasePricing；
    /// 输出中 BasePricing 在前、Partial 在后
    pub fn round_staged(&self, pending: Vec<Record>, catalog: &ReferenceCatalog) -> RoundOutput {
        let reference = catalog.staged();
        if pending.is_empty() || reference.is_empty() {
            return Self::skipped(pending);
        }

        let joined = left_join(pending, &reference, MatchKeySet::Full);
        let sentinel = self.pending_product_price_sentinel.as_str();
        let classified: Vec<ClassifiedRecord> = joined
            .matched
            .into_iter()
            .map(|row| {
                self.finish_row(row, |_, entry| {
                    if entry.product_price_id == sentinel {
                        MatchLabel::Partial
                    } else {
                        MatchLabel::BasePricing
                    }
                })
            })
            .collect();

        let (mut matched, partial): (Vec<_>, Vec<_>) = classified
            .into_iter()
            .partition(|c| c.label == MatchLabel::BasePricing);
        matched.extend(partial);

        RoundOutput {
            matched,
            remainder: joined.remainder,
        }
    }

    /// 第 3 轮: (CatalogNumber, ManufacturerPartNumber) × 全量 → 制造商/供应商规则集
    pub fn round_catalog_part(&self, pending: Vec<Record>, catalog: &ReferenceCatalog) -> RoundOutput {
        self.round_with_rules(
            pending,
            catalog,
            MatchKeySet::CatalogManufacturerPart,
            RuleSet::ManufacturerVendor,
        )
    }

    /// 第 4 轮: (CatalogNumber, ManufacturerName) × 全量 → 目录规则集
    pub fn round_catalog_name(&self, pending: Vec<Record>, catalog: &ReferenceCatalog) -> RoundOutput {
        self.round_with_rules(
            pending,
            catalog,
            MatchKeySet::CatalogManufacturerName,
            RuleSet::Catalog,
        )
    }

    fn round_with_rules(
        &self,
        pending: Vec<Record>,
        catalog: &ReferenceCatalog,
        keys: MatchKeySet,
        rules: RuleSet,
    ) -> RoundOutput {
        let reference = catalog.all();
        if pending.is_empty() || reference.is_empty() {
            return Self::skipped(pending);
        }

        let joined = left_join(pending, &reference, keys);
        RoundOutput {
            matched: joined
                .matched
                .into_iter()
                .map(|row| {
                    self.finish_row(row, |record, _| {
                        rules.classify(&AttributeEquality::from_joined(record))
                    })
                })
                .collect(),
            remainder: joined.remainder,
        }
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 打标签（在后缀列合并之前）并合并后缀列
    fn finish_row<F>(&self, row: JoinedRow<'_>, label_of: F) -> ClassifiedRecord
    where
        F: Fn(&Record, &ReferenceEntry) -> MatchLabel,
    {
        let label = label_of(&row.record, row.reference);
        let mut record = row.record;
        self.reconciler.reconcile(&mut record);
        ClassifiedRecord::new(record, label, row.reference.is_discontinued)
    }

    fn skipped(pending: Vec<Record>) -> RoundOutput {
        RoundOutput {
            matched: Vec::new(),
            remainder: pending,
        }
    }
}
