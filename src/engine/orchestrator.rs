// ==========================================
// 产品目录对账系统 - 批次编排器
// ==========================================
// 用途: 协调一次批处理的执行顺序
// 流程:
// 1) 批次表头可行性检查（不可行 → 附加 Missing Headers 列，返回失败结果）
// 2) 转换器需要时: 拉取参考目录 → 匹配级联
// 3) 逐条处理循环（含转换器 finish）
// ==========================================

use crate::config::ReconcileConfig;
use crate::domain::fields;
use crate::domain::record::RecordSet;
use crate::domain::report::BatchResult;
use crate::engine::cascade::MatchCascade;
use crate::engine::error::{ReconcileError, ReconcileResult};
use crate::engine::line_processor::LineProcessor;
use crate::engine::transformer::RecordTransformer;
use crate::engine::viability::batch_missing_message;
use crate::repository::reference_catalog_repo::ReferenceCatalogProvider;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ReconcileOrchestrator - 批次编排器
// ==========================================
pub struct ReconcileOrchestrator<P>
where
    P: ReferenceCatalogProvider,
{
    provider: Arc<P>,
    config: ReconcileConfig,
    cascade: MatchCascade,
    line_processor: LineProcessor,
}

impl<P> ReconcileOrchestrator<P>
where
    P: ReferenceCatalogProvider,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - provider: 参考目录来源
    /// - config: 已解析的对账配置
    pub fn new(provider: Arc<P>, config: ReconcileConfig) -> Self {
        Self {
            cascade: MatchCascade::new(&config),
            line_processor: LineProcessor::new(),
            provider,
            config,
        }
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// 执行一次批处理（自动生成 run_id）
    pub fn run_batch(
        &self,
        batch: RecordSet,
        transformer: &mut dyn RecordTransformer,
    ) -> ReconcileResult<BatchResult> {
        self.run_batch_with_id(Uuid::new_v4().to_string(), batch, transformer)
    }

    /// 以指定 run_id 执行一次批处理
    ///
    /// # 参数
    /// - run_id: 与写入端共用的运行标识
    ///
    /// # 返回
    /// - Ok(BatchResult): 含结构性失败（缺表头 / 无记录通过）
    /// - Err: 参考目录读取或写入缓冲写出失败
    #[instrument(skip(self, batch, transformer), fields(transformer = transformer.name(), records = batch.len()))]
    pub fn run_batch_with_id(
        &self,
        run_id: String,
        mut batch: RecordSet,
        transformer: &mut dyn RecordTransformer,
    ) -> ReconcileResult<BatchResult> {
        transformer.prepare(&mut batch);

        // ==========================================
        // 步骤1: 批次表头可行性
        // ==========================================
        let requirements = transformer.requirements();
        let header_check = requirements.check(batch.columns());
        if let Some(message) = batch_missing_message(&header_check) {
            warn!(run_id = %run_id, missing = ?header_check.missing_required, "批次表头不满足字段需求");
            let missing = header_check.missing_required.join(", ");
            let mut records = batch;
            records.add_column(fields::MISSING_HEADERS);
            for record in records.records_mut() {
                record.set(fields::MISSING_HEADERS, missing.as_str());
            }
            let fail_count = records.len();
            return Ok(BatchResult {
                run_id,
                records,
                success: false,
                message,
                pass_count: 0,
                fail_count,
            });
        }

        // ==========================================
        // 步骤2: 匹配级联
        // ==========================================
        let candidates = if transformer.uses_cascade() {
            let catalog = self
                .provider
                .fetch_reference_catalog()
                .map_err(ReconcileError::ReferenceCatalog)?;
            self.cascade.reconcile(&batch, &catalog)
        } else {
            batch
        };

        // ==========================================
        // 步骤3: 逐条处理
        // ==========================================
        let outcome = self
            .line_processor
            .run(candidates, transformer)
            .map_err(ReconcileError::WriteBuffer)?;

        info!(
            run_id = %run_id,
            pass = outcome.pass_count,
            fail = outcome.fail_count,
            "批处理完成: {}",
            outcome.message
        );

        Ok(BatchResult {
            run_id,
            records: outcome.records,
            success: outcome.success,
            message: outcome.message,
            pass_count: outcome.pass_count,
            fail_count: outcome.fail_count,
        })
    }
}
