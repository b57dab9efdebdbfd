// ==========================================
// 产品目录对账系统 - 记录转换器 Trait
// ==========================================
// 职责: 定义按记录类型可插拔的单条处理策略
// 红线: 转换器在逐条循环开始前选定，循环中不切换
// ==========================================

use crate::domain::record::{Record, RecordSet};
use crate::engine::error::TransformError;
use crate::engine::reporter::Reporter;
use crate::engine::viability::FieldRequirements;
use crate::repository::error::RepositoryResult;

// ==========================================
// RecordTransformer Trait
// ==========================================
// 实现者:
// - NoProcessTransformer（默认，未构建处理流程）
// - CatalogReviewTransformer（importer::catalog_review）
pub trait RecordTransformer {
    /// 转换器名称（日志用）
    fn name(&self) -> &str;

    /// 批次与单条记录的字段需求
    fn requirements(&self) -> FieldRequirements {
        FieldRequirements::none()
    }

    /// 表头检查之前补全批次（例如拼装缺失的身份字段）
    fn prepare(&mut self, _batch: &mut RecordSet) {}

    /// 逐条循环之前是否先运行匹配级联
    fn uses_cascade(&self) -> bool {
        false
    }

    /// 处理单条记录
    ///
    /// # 返回
    /// - Ok(true): 记录通过
    /// - Ok(false): 记录未通过（原因已写入报告器）
    /// - Err(TransformError::Record): 记录级错误，消息写入 Fail 通道
    /// - Err(TransformError::Collaborator): 中止批次
    fn transform(&mut self, record: &mut Record, reporter: &mut Reporter)
        -> Result<bool, TransformError>;

    /// 批次结束钩子（写出缓冲余量）
    fn finish(&mut self) -> RepositoryResult<()> {
        Ok(())
    }
}

// ==========================================
// NoProcessTransformer - 默认转换器
// ==========================================
#[derive(Debug, Default)]
pub struct NoProcessTransformer;

impl RecordTransformer for NoProcessTransformer {
    fn name(&self) -> &str {
        "No Process"
    }

    fn transform(
        &mut self,
        _record: &mut Record,
        reporter: &mut Reporter,
    ) -> Result<bool, TransformError> {
        reporter.report_no_process();
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Channel;

    #[test]
    fn test_no_process_reports_alert_and_fails() {
        let mut transformer = NoProcessTransformer;
        let mut reporter = Reporter::new();
        let mut record = Record::new();

        let ok = transformer.transform(&mut record, &mut reporter).unwrap();

        assert!(!ok);
        assert_eq!(reporter.channel(Channel::Alert), "No process built");
        assert!(!transformer.uses_cascade());
        assert!(transformer.requirements().required().is_empty());
    }
}
