// ==========================================
// 产品目录对账系统 - 三通道报告器
// ==========================================
// 职责: 单条记录处理过程中累积 Pass / Alert / Fail 消息
// 规则: 消息已是该通道当前内容的子串时不重复追加；多条消息以 "; " 连接
// ==========================================

use crate::domain::report::ReportEntry;
use crate::domain::types::Channel;
use crate::engine::viability::{record_missing_message, ViabilityReport};

pub const LINE_VIABILITY_PASSED: &str = "Passed Line Viability";
pub const LINE_VIABILITY_FAILED: &str = "Failed Line Viability";
pub const SUCCESS_AT_EXIT: &str = "Success at exit";
pub const FAILED_AT_EXIT: &str = "Failed at exit";
pub const NO_PROCESS_BUILT: &str = "No process built";
pub const DEFAULT_UNIT_OF_ISSUE: &str = "Default UOI";

#[derive(Debug, Default)]
pub struct Reporter {
    entry: ReportEntry,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以记录已有的报告内容作为起点
    pub fn seed(&mut self, entry: ReportEntry) {
        self.entry = entry;
    }

    /// 追加消息（子串去重）
    pub fn record(&mut self, channel: Channel, message: &str) {
        let message = message.trim();
        if message.is_empty() {
            return;
        }
        let current = self.entry.channel_mut(channel);
        if current.contains(message) {
            return;
        }
        if current.is_empty() {
            current.push_str(message);
        } else {
            current.push_str("; ");
            current.push_str(message);
        }
    }

    /// 当前报告快照
    pub fn flush(&self) -> ReportEntry {
        self.entry.clone()
    }

    pub fn clear(&mut self) {
        self.entry = ReportEntry::default();
    }

    pub fn channel(&self, channel: Channel) -> &str {
        self.entry.channel(channel)
    }

    // ==========================================
    // 常用报告
    // ==========================================

    pub fn report_line_viability(&mut self, viable: bool) {
        if viable {
            self.record(Channel::Pass, LINE_VIABILITY_PASSED);
        } else {
            self.record(Channel::Fail, LINE_VIABILITY_FAILED);
        }
    }

    pub fn report_missing_data(&mut self, report: &ViabilityReport) {
        self.record(Channel::Fail, &record_missing_message(report));
    }

    pub fn final_report(&mut self, success: bool) {
        if success {
            self.record(Channel::Pass, SUCCESS_AT_EXIT);
        } else {
            self.record(Channel::Fail, FAILED_AT_EXIT);
        }
    }

    pub fn report_no_process(&mut self) {
        self.record(Channel::Alert, NO_PROCESS_BUILT);
    }

    pub fn report_default_unit_of_issue(&mut self) {
        self.record(Channel::Alert, DEFAULT_UNIT_OF_ISSUE);
    }
}
