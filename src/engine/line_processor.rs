// ==========================================
// 产品目录对账系统 - 逐条处理循环
// ==========================================
// 职责: 对每条记录做单条可行性检查、调用转换器、汇总三通道报告
// 流程(单条):
// 1) 以记录已有 Pass/Alert/Fail 作为报告起点
// 2) 删除空白列
// 3) 可行 → 转换器处理 → 最终报告；不可行 → 缺失数据报告
// 4) Pass/Alert/Fail 放到位置 1/2/3 后写回输出表
// ==========================================
// 红线: 记录级错误不中止批次；协作方错误原样上抛
// ==========================================

use crate::domain::fields;
use crate::domain::record::RecordSet;
use crate::domain::report::ReportEntry;
use crate::domain::types::Channel;
use crate::engine::error::TransformError;
use crate::engine::reporter::Reporter;
use crate::engine::transformer::RecordTransformer;
use crate::repository::error::RepositoryResult;
use tracing::{debug, info};

/// 逐条处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    pub records: RecordSet,
    pub pass_count: usize,
    pub fail_count: usize,
    /// 至少一条通过
    pub success: bool,
    /// "<fail> Fail, <pass> Pass."
    pub message: String,
}

pub struct LineProcessor;

impl LineProcessor {
    pub fn new() -> Self {
        Self
    }

    /// 运行逐条循环并在结束时调用转换器的 finish
    ///
    /// # 参数
    /// - input: 候选记录集（级联输出或原始批次）
    /// - transformer: 本批次选定的转换器
    pub fn run(
        &self,
        input: RecordSet,
        transformer: &mut dyn RecordTransformer,
    ) -> RepositoryResult<LineOutcome> {
        let requirements = transformer.requirements();

        let mut output = RecordSet::new(input.columns().iter().map(String::as_str));
        for (index, column) in fields::REPORT_FIELDS.iter().enumerate() {
            output.place_column(index + 1, column);
        }

        let mut reporter = Reporter::new();
        let mut good = 0usize;
        let mut bad = 0usize;

        for (row, mut record) in input.into_records().into_iter().enumerate() {
            reporter.seed(ReportEntry::from_record(&record));
            record.drop_blank();

            let viability = requirements.check(&record.present_columns());
            let success = if viability.viable {
                reporter.report_line_viability(true);
                let passed = match transformer.transform(&mut record, &mut reporter) {
                    Ok(passed) => passed,
                    Err(TransformError::Record(message)) => {
                        reporter.record(Channel::Fail, &message);
                        false
                    }
                    Err(TransformError::Collaborator(err)) => return Err(err),
                };
                reporter.final_report(passed);
                passed
            } else {
                reporter.report_line_viability(false);
                reporter.report_missing_data(&viability);
                false
            };

            reporter.flush().attach_to(&mut record);
            reporter.clear();
            output.push(record);

            if success {
                good += 1;
            } else {
                bad += 1;
            }
            debug!(row, success, "记录处理完成");
        }

        transformer.finish()?;

        let message = format!("{} Fail, {} Pass.", bad, good);
        info!(
            transformer = transformer.name(),
            pass = good,
            fail = bad,
            "逐条处理完成"
        );

        Ok(LineOutcome {
            records: output,
            pass_count: good,
            fail_count: bad,
            success: good != 0,
            message,
        })
    }
}

impl Default for LineProcessor {
    fn default() -> Self {
        Self::new()
    }
}
