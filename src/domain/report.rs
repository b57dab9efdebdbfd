// ==========================================
// 产品目录对账系统 - 报告与批次结果
// ==========================================
// 职责: 单条记录的三通道报告 / 批次处理结果
// ==========================================

use crate::domain::record::{Record, RecordSet};
use crate::domain::types::Channel;
use serde::{Deserialize, Serialize};

// ==========================================
// ReportEntry - 单条记录报告
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub pass: String,
    pub alert: String,
    pub fail: String,
}

impl ReportEntry {
    /// 从记录已有的 Pass/Alert/Fail 列读取（缺失为空）
    pub fn from_record(record: &Record) -> Self {
        Self {
            pass: record.value(Channel::Pass.column()).trim().to_string(),
            alert: record.value(Channel::Alert.column()).trim().to_string(),
            fail: record.value(Channel::Fail.column()).trim().to_string(),
        }
    }

    pub fn channel(&self, channel: Channel) -> &str {
        match channel {
            Channel::Pass => &self.pass,
            Channel::Alert => &self.alert,
            Channel::Fail => &self.fail,
        }
    }

    pub fn channel_mut(&mut self, channel: Channel) -> &mut String {
        match channel {
            Channel::Pass => &mut self.pass,
            Channel::Alert => &mut self.alert,
            Channel::Fail => &mut self.fail,
        }
    }

    /// 写回记录：Pass/Alert/Fail 依次放在位置 1/2/3，替换同名列
    pub fn attach_to(&self, record: &mut Record) {
        record.insert_at(1, Channel::Pass.column(), self.pass.as_str());
        record.insert_at(2, Channel::Alert.column(), self.alert.as_str());
        record.insert_at(3, Channel::Fail.column(), self.fail.as_str());
    }
}

// ==========================================
// BatchResult - 批次处理结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub run_id: String,
    pub records: RecordSet,
    /// 至少一条记录通过
    pub success: bool,
    pub message: String,
    pub pass_count: usize,
    pub fail_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_to_places_channels_after_first_column() {
        let mut record = Record::from_pairs([("CatalogNumber", "C1"), ("Alert", "old"), ("X", "1")]);
        let entry = ReportEntry {
            pass: "ok".to_string(),
            alert: "note".to_string(),
            fail: String::new(),
        };
        entry.attach_to(&mut record);

        let columns: Vec<&str> = record.columns().collect();
        assert_eq!(columns, vec!["CatalogNumber", "Pass", "Alert", "Fail", "X"]);
        assert_eq!(record.value("Alert"), "note");
    }

    #[test]
    fn test_from_record_reads_existing_channels() {
        let record = Record::from_pairs([("Alert", "Ready to update/contract")]);
        let entry = ReportEntry::from_record(&record);
        assert_eq!(entry.alert, "Ready to update/contract");
        assert!(entry.pass.is_empty());
        assert!(entry.fail.is_empty());
    }
}
