// ==========================================
// 产品目录对账系统 - 导入/导出 Trait
// ==========================================
// 职责: 定义批次文件读取与结果文件导出接口（不包含实现）
// ==========================================

use crate::domain::record::RecordSet;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser / ExcelParser
pub trait FileParser {
    /// 读取批次文件为记录集
    ///
    /// # 返回
    /// - Ok(RecordSet): 保持表头顺序；重复表头保留第一次出现；整行空白的行被跳过
    /// - Err: 文件不存在 / 格式不支持 / 解析失败
    fn parse(&self, file_path: &Path) -> ImportResult<RecordSet>;
}

// ==========================================
// RecordExporter Trait
// ==========================================
// 实现者: CsvExporter
pub trait RecordExporter {
    /// 导出记录集
    ///
    /// # 返回
    /// - Ok(usize): 写出的数据行数
    fn export(&self, records: &RecordSet, file_path: &Path) -> ImportResult<usize>;
}
